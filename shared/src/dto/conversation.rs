//! # Conversation DTOs
//!
//! Bodies for `/api/conversations` and `/api/messages`.
//!
//! A stored message row either carries literal text or marks an emergency event.
//! Rows with `isEmergencyPrompt = true` hold [`EMERGENCY_SENTINEL_CONTENT`] instead
//! of text; readers must rebuild the emergency affordance from the flag, never
//! from the content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed content stored in emergency prompt rows.
pub const EMERGENCY_SENTINEL_CONTENT: &str = "[emergency-prompt]";

/// Author of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(format!("Invalid message role: {}", s)),
        }
    }
}

/// `POST /api/conversations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateConversationRequest {
    pub title: String,
}

/// `PATCH /api/conversations/{id}`
///
/// `title` is optional on the wire so that a missing title is reported as a
/// validation error by the handler instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RenameConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// One entry of the sidebar list; also the body returned by create and rename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
}

/// One row of `GET /api/conversations/{id}`, in creation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, alias = "is_emergency_prompt")]
    pub is_emergency_prompt: bool,
}

/// `POST /api/messages`
///
/// The owner is never part of the body; the gateway substitutes the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(alias = "conversation_id")]
    pub conversation_id: String,
    pub content: String,
    pub role: Role,
    #[serde(default, alias = "is_emergency_prompt", skip_serializing_if = "Option::is_none")]
    pub is_emergency_prompt: Option<bool>,
}

/// Generic `{ "success": true }` acknowledgement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
