use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use shared::dto::{ConversationSummary, Hospital as HospitalDto, Role, StoredMessage};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Data structure for creating a new user.
///
/// Password should be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserForCreate {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
        }
    }
}

/// Conversation owned by one user.
#[derive(Debug, Clone, FromRow)]
pub struct Conversation {
    pub id: String,
    pub user_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationSummary {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            title: conversation.title,
        }
    }
}

/// Persisted message row.
///
/// `role` is kept as text; the table's CHECK constraint limits it to
/// `user`/`assistant`.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub conversation_id: String,
    pub user_id: i64,
    pub role: String,
    pub content: String,
    pub is_emergency_prompt: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Message> for StoredMessage {
    type Error = AppError;

    fn try_from(message: Message) -> Result<Self> {
        let role: Role = message
            .role
            .parse()
            .map_err(|e: String| AppError::Decoding(format!("message {}: {}", message.id, e)))?;

        Ok(Self {
            role,
            content: message.content,
            is_emergency_prompt: message.is_emergency_prompt,
        })
    }
}

/// Data structure for appending a message.
#[derive(Debug, Clone)]
pub struct MessageForCreate {
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    pub is_emergency_prompt: bool,
}

/// Hospital record with coordinates in decimal degrees.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Hospital {
    pub fn into_dto(self, distance_meters: f64) -> HospitalDto {
        HospitalDto {
            id: self.id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            website: self.website,
            distance_meters,
        }
    }
}

/// Data structure for inserting a hospital (seeding).
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct HospitalForCreate {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}
