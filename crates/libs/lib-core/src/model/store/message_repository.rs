//! # Message Repository
//!
//! Append and read messages of an owned conversation. Reads are returned in
//! creation order (timestamp, then row id); callers never reorder.

use super::models::{Message, MessageForCreate};
use super::DbPool;
use crate::error::{AppError, Result};
use lib_utils::now_utc;
use sqlx::query_as;

pub struct MessageRepository;

impl MessageRepository {
    /// Append a message to a conversation owned by `user_id`.
    ///
    /// The ownership check and the insert are one statement, so a foreign or
    /// missing conversation inserts nothing and yields [`AppError::NotFound`].
    pub async fn append(pool: &DbPool, user_id: i64, message: MessageForCreate) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO messages (conversation_id, user_id, role, content, is_emergency_prompt, created_at) \
             SELECT ?, ?, ?, ?, ?, ? \
             WHERE EXISTS (SELECT 1 FROM conversations WHERE id = ? AND user_id = ?)",
        )
        .bind(&message.conversation_id)
        .bind(user_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(message.is_emergency_prompt)
        .bind(now_utc())
        .bind(&message.conversation_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conversation_not_found());
        }

        Ok(result.last_insert_rowid())
    }

    /// Full history of an owned conversation, oldest first.
    pub async fn list_for_conversation(
        pool: &DbPool,
        conversation_id: &str,
        user_id: i64,
    ) -> Result<Vec<Message>> {
        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM conversations WHERE id = ? AND user_id = ?",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        if owned == 0 {
            return Err(AppError::conversation_not_found());
        }

        let rows = query_as::<_, Message>(
            "SELECT id, conversation_id, user_id, role, content, is_emergency_prompt, created_at \
             FROM messages WHERE conversation_id = ? AND user_id = ? \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::models::UserForCreate;
    use crate::model::store::{connect_in_memory, ConversationRepository, UserRepository};
    use shared::dto::{Role, StoredMessage, EMERGENCY_SENTINEL_CONTENT};

    async fn setup() -> (DbPool, i64, String) {
        let pool = connect_in_memory().await.unwrap();
        let user = UserRepository::create(
            &pool,
            UserForCreate::new("carol".into(), "carol@example.com".into(), "h".into()),
        )
        .await
        .unwrap();
        let conv = ConversationRepository::create(&pool, user.id, "Chest pain").await.unwrap();
        (pool, user.id, conv.id)
    }

    fn msg(conversation_id: &str, role: Role, content: &str, emergency: bool) -> MessageForCreate {
        MessageForCreate {
            conversation_id: conversation_id.to_string(),
            role,
            content: content.to_string(),
            is_emergency_prompt: emergency,
        }
    }

    #[tokio::test]
    async fn test_history_in_creation_order() {
        let (pool, user_id, conv) = setup().await;

        MessageRepository::append(&pool, user_id, msg(&conv, Role::User, "I have chest pain", false))
            .await
            .unwrap();
        MessageRepository::append(&pool, user_id, msg(&conv, Role::Assistant, "Seek help", false))
            .await
            .unwrap();
        MessageRepository::append(
            &pool,
            user_id,
            msg(&conv, Role::Assistant, EMERGENCY_SENTINEL_CONTENT, true),
        )
        .await
        .unwrap();

        let rows: Vec<StoredMessage> = MessageRepository::list_for_conversation(&pool, &conv, user_id)
            .await
            .unwrap()
            .into_iter()
            .map(StoredMessage::try_from)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].role, Role::User);
        assert_eq!(rows[1].content, "Seek help");
        assert!(!rows[1].is_emergency_prompt);
        assert!(rows[2].is_emergency_prompt);
    }

    #[tokio::test]
    async fn test_append_to_foreign_conversation_rejected() {
        let (pool, _owner, conv) = setup().await;
        let intruder = UserRepository::create(
            &pool,
            UserForCreate::new("mallory".into(), "m@example.com".into(), "h".into()),
        )
        .await
        .unwrap();

        let err = MessageRepository::append(&pool, intruder.id, msg(&conv, Role::User, "hi", false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = MessageRepository::list_for_conversation(&pool, &conv, intruder.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_conversation_lists_nothing() {
        let (pool, user_id, conv) = setup().await;
        let rows = MessageRepository::list_for_conversation(&pool, &conv, user_id).await.unwrap();
        assert!(rows.is_empty());
    }
}
