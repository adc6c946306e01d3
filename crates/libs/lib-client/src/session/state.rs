//! # Session State
//!
//! The in-memory chat a front-end renders. Only [`crate::ChatSession`] mutates it;
//! readers get a clone through [`crate::ChatSession::state`].

use super::reveal::Reveal;
use shared::{Role, StoredMessage};
use uuid::Uuid;

/// Call to action shown with every emergency affordance.
pub const EMERGENCY_NOTICE: &str =
    "This sounds like a critical emergency. You should seek professional medical help immediately.";
pub const EMERGENCY_ACTION_LABEL: &str = "Find Nearest Emergency Room Now";
/// Front-end route the affordance's action leads to.
pub const HOSPITALS_ROUTE: &str = "/hospitals";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    /// Rendered as [`EMERGENCY_NOTICE`] plus an action to [`HOSPITALS_ROUTE`].
    EmergencyAffordance,
}

/// One rendered message. `id` is local to this client and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiMessage {
    pub id: Uuid,
    pub role: Role,
    pub body: MessageBody,
}

impl UiMessage {
    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            body: MessageBody::Text(content.into()),
        }
    }

    pub fn emergency() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            body: MessageBody::EmergencyAffordance,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text(text) => Some(text),
            MessageBody::EmergencyAffordance => None,
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self.body, MessageBody::EmergencyAffordance)
    }
}

impl From<StoredMessage> for UiMessage {
    /// Flagged rows become the affordance; their stored content is ignored.
    fn from(row: StoredMessage) -> Self {
        if row.is_emergency_prompt {
            Self::emergency()
        } else {
            Self::text(row.role, row.content)
        }
    }
}

/// Where the current turn is. Only the awaiting phases block a new `send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    AwaitingConversationId,
    PersistingMessage,
    MessagePersisted,
    AwaitingAiResponse,
    AiResponseReceived,
    Streaming,
}

impl TurnPhase {
    pub fn is_awaiting(&self) -> bool {
        !matches!(self, TurnPhase::Idle | TurnPhase::Streaming)
    }
}

/// Bookkeeping for the turn that currently owns the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActiveTurn {
    pub conversation_id: Option<String>,
    /// Set when this turn created its conversation.
    pub created: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub active_id: Option<String>,
    pub messages: Vec<UiMessage>,
    pub typing: bool,
    pub phase: TurnPhase,
    /// Bumped by every send, load and reset. Results of older operations are dropped.
    pub generation: u64,
    pub(crate) turn: Option<ActiveTurn>,
    pub(crate) reveal: Option<Reveal>,
}

impl SessionState {
    /// Back to a fresh chat. The generation counter survives.
    pub(crate) fn clear(&mut self) {
        self.active_id = None;
        self.messages.clear();
        self.typing = false;
        self.phase = TurnPhase::Idle;
        self.turn = None;
        self.reveal = None;
    }

    pub(crate) fn message_mut(&mut self, id: Uuid) -> Option<&mut UiMessage> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Conversation the in-flight turn is writing to, if known yet.
    pub(crate) fn turn_conversation(&self) -> Option<&str> {
        self.turn.as_ref().and_then(|t| t.conversation_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::EMERGENCY_SENTINEL_CONTENT;

    #[test]
    fn test_flagged_row_becomes_affordance() {
        let row = StoredMessage {
            role: Role::Assistant,
            content: EMERGENCY_SENTINEL_CONTENT.to_string(),
            is_emergency_prompt: true,
        };

        let message = UiMessage::from(row);
        assert!(message.is_emergency());
        assert_eq!(message.as_text(), None);
    }

    #[test]
    fn test_phase_guard() {
        assert!(!TurnPhase::Idle.is_awaiting());
        assert!(!TurnPhase::Streaming.is_awaiting());
        assert!(TurnPhase::AwaitingConversationId.is_awaiting());
        assert!(TurnPhase::AwaitingAiResponse.is_awaiting());
        assert!(TurnPhase::AiResponseReceived.is_awaiting());
    }
}
