//! # Conversation Repository
//!
//! Owner-scoped access to conversations. Every statement filters on both the
//! conversation id and the caller's user id, so a foreign id is reported as
//! [`AppError::NotFound`] exactly like a missing one.

use super::models::Conversation;
use super::DbPool;
use crate::error::{AppError, Result};
use lib_utils::now_utc;
use sqlx::query_as;
use tracing::debug;
use uuid::Uuid;

pub struct ConversationRepository;

impl ConversationRepository {
    /// Create a conversation with a fresh UUID v4 id.
    pub async fn create(pool: &DbPool, user_id: i64, title: &str) -> Result<Conversation> {
        let id = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO conversations (id, user_id, title, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(user_id)
            .bind(title)
            .bind(now_utc())
            .execute(pool)
            .await?;

        debug!(conversation_id = %id, user_id, "conversation created");

        Self::find_owned(pool, &id, user_id)
            .await?
            .ok_or_else(AppError::conversation_not_found)
    }

    /// All conversations of one owner, newest first.
    pub async fn list_for_user(pool: &DbPool, user_id: i64) -> Result<Vec<Conversation>> {
        let rows = query_as::<_, Conversation>(
            "SELECT id, user_id, title, created_at FROM conversations \
             WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_owned(pool: &DbPool, id: &str, user_id: i64) -> Result<Option<Conversation>> {
        let row = query_as::<_, Conversation>(
            "SELECT id, user_id, title, created_at FROM conversations WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Change the title of an owned conversation.
    pub async fn rename(pool: &DbPool, id: &str, user_id: i64, title: &str) -> Result<Conversation> {
        let result = sqlx::query("UPDATE conversations SET title = ? WHERE id = ? AND user_id = ?")
            .bind(title)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conversation_not_found());
        }

        Self::find_owned(pool, id, user_id)
            .await?
            .ok_or_else(AppError::conversation_not_found)
    }

    /// Delete an owned conversation together with its messages.
    pub async fn delete(pool: &DbPool, id: &str, user_id: i64) -> Result<()> {
        let mut tx = pool.begin().await?;

        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM conversations WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if owned == 0 {
            return Err(AppError::conversation_not_found());
        }

        let messages = sqlx::query("DELETE FROM messages WHERE conversation_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM conversations WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            conversation_id = %id,
            user_id,
            messages_removed = messages.rows_affected(),
            "conversation deleted"
        );
        Ok(())
    }
}
