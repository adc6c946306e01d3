//! # User Repository
//!
//! Provides database access layer for account records.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{connect_in_memory, UserRepository};
//! # use lib_core::model::store::models::UserForCreate;
//! # async fn example() -> lib_core::Result<()> {
//! let pool = connect_in_memory().await?;
//!
//! let user = UserRepository::create(
//!     &pool,
//!     UserForCreate::new("alice".into(), "alice@example.com".into(), "hash".into()),
//! ).await?;
//!
//! let found = UserRepository::find_by_email(&pool, "alice@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate};
use super::DbPool;
use lib_utils::now_utc;
use sqlx::query_as;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their username.
    pub async fn find_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email when the identifier contains `@`, else by username.
    pub async fn find_by_login(pool: &DbPool, email_or_username: &str) -> Result<Option<User>, sqlx::Error> {
        if email_or_username.contains('@') {
            Self::find_by_email(pool, email_or_username).await
        } else {
            Self::find_by_username(pool, email_or_username).await
        }
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user in the database.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Username already exists (UNIQUE constraint violation)
    /// - Email already exists (UNIQUE constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let now = now_utc();

        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user_data.username)
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// Set `last_login` to now. Unknown ids update nothing.
    pub async fn update_last_login(pool: &DbPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = ?, updated_at = ? WHERE id = ?")
            .bind(now_utc())
            .bind(now_utc())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::connect_in_memory;

    fn alice() -> UserForCreate {
        UserForCreate::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hashed".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = connect_in_memory().await.unwrap();

        let user = UserRepository::create(&pool, alice()).await.unwrap();
        assert!(user.is_active);
        assert!(user.last_login.is_none());

        let by_login = UserRepository::find_by_login(&pool, "alice").await.unwrap();
        assert_eq!(by_login.map(|u| u.id), Some(user.id));

        let by_mail = UserRepository::find_by_login(&pool, "alice@example.com").await.unwrap();
        assert_eq!(by_mail.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = connect_in_memory().await.unwrap();
        UserRepository::create(&pool, alice()).await.unwrap();

        let err = UserRepository::create(&pool, alice()).await.unwrap_err();
        let app_err: crate::AppError = err.into();
        assert!(matches!(app_err, crate::AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let pool = connect_in_memory().await.unwrap();
        let user = UserRepository::create(&pool, alice()).await.unwrap();

        UserRepository::update_last_login(&pool, user.id).await.unwrap();

        let reloaded = UserRepository::find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }
}
