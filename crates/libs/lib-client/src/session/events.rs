//! # Session Events
//!
//! Notifications published by [`crate::ChatSession`] on its `async_channel`.
//! A front-end drains them and re-reads [`crate::ChatSession::state`] as needed.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Messages were appended, replaced or finished revealing.
    MessagesChanged,
    Typing(bool),
    /// Next slice of an assistant message being revealed.
    Revealed { message_id: Uuid, chunk: String },
    /// An emergency affordance was appended after a fully revealed answer.
    EmergencyPrompt { message_id: Uuid },
    /// A turn that created its conversation finished; point the location at it.
    Navigate(String),
    /// The conversation list changed; carries the new refresh token value.
    RefreshSidebar(u64),
    TurnFailed(String),
    LoadFailed(String),
    /// The session went back to a fresh chat.
    Reset,
}
