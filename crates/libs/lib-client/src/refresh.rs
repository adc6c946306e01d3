use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, monotonically increasing "the conversation list changed" counter.
///
/// Writers bump it; readers compare against the value they last fetched at.
#[derive(Debug, Clone, Default)]
pub struct RefreshToken(Arc<AtomicU64>);

impl RefreshToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns the new value.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counter() {
        let token = RefreshToken::new();
        let other = token.clone();

        assert_eq!(token.bump(), 1);
        assert_eq!(other.bump(), 2);
        assert_eq!(token.current(), 2);
    }
}
