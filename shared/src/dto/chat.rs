//! # Chat DTOs
//!
//! Bodies for one AI turn (`POST /api/chat`) and for AI title generation
//! (`POST /api/title`).

use super::conversation::Role;
use serde::{Deserialize, Serialize};

/// Placeholder forwarded to the AI instead of non-text history entries.
pub const NON_TEXT_PLACEHOLDER: &str = "User interface element";

/// One prior message forwarded to the AI. Always text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    #[serde(alias = "emergency_flag")]
    pub emergency_flag: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TitleRequest {
    #[serde(alias = "conversation_id")]
    pub conversation_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleResponse {
    pub success: bool,
    pub title: String,
}
