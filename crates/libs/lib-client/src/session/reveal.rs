//! # Simulated Streaming
//!
//! The assistant's answer arrives whole; the session reveals it a few characters
//! per tick. [`Reveal`] is the cursor over that text. The tick loop lives in
//! [`crate::ChatSession`] and stops through the reveal's [`CancellationToken`].

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub(crate) struct Reveal {
    pub message_id: Uuid,
    full: String,
    /// Byte offset of the revealed prefix, always on a char boundary.
    cursor: usize,
    pub emergency: bool,
    /// Conversation to navigate to once the reveal completes.
    pub navigate_to: Option<String>,
    pub cancel: CancellationToken,
}

impl Reveal {
    pub fn new(
        message_id: Uuid,
        full: String,
        emergency: bool,
        navigate_to: Option<String>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            message_id,
            full,
            cursor: 0,
            emergency,
            navigate_to,
            cancel,
        }
    }

    /// Reveal up to `chars` more characters and return them.
    pub fn advance(&mut self, chars: usize) -> Option<String> {
        let rest = &self.full[self.cursor..];
        if rest.is_empty() {
            return None;
        }

        let end = rest
            .char_indices()
            .nth(chars.max(1))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let chunk = rest[..end].to_string();
        self.cursor += end;
        Some(chunk)
    }

    pub fn revealed(&self) -> &str {
        &self.full[..self.cursor]
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.full.len()
    }

    /// Jump to the end and hand back the full text.
    pub fn into_full(self) -> String {
        self.full
    }
}
