use super::state::UiMessage;
use shared::{HistoryEntry, NON_TEXT_PLACEHOLDER};

/// Last `window` messages, oldest first, as text-only history for the AI.
///
/// Non-text messages are forwarded as [`NON_TEXT_PLACEHOLDER`].
pub fn build_history(messages: &[UiMessage], window: usize) -> Vec<HistoryEntry> {
    let start = messages.len().saturating_sub(window);

    messages[start..]
        .iter()
        .map(|message| HistoryEntry {
            role: message.role,
            content: message
                .as_text()
                .unwrap_or(NON_TEXT_PLACEHOLDER)
                .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    fn numbered(count: usize) -> Vec<UiMessage> {
        (0..count)
            .map(|i| {
                let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
                UiMessage::text(role, format!("m{}", i))
            })
            .collect()
    }

    fn contents(history: &[HistoryEntry]) -> Vec<&str> {
        history.iter().map(|h| h.content.as_str()).collect()
    }

    #[test]
    fn test_window_boundaries() {
        assert!(build_history(&numbered(0), 6).is_empty());
        assert_eq!(contents(&build_history(&numbered(1), 6)), ["m0"]);
        assert_eq!(
            contents(&build_history(&numbered(6), 6)),
            ["m0", "m1", "m2", "m3", "m4", "m5"]
        );
        assert_eq!(
            contents(&build_history(&numbered(7), 6)),
            ["m1", "m2", "m3", "m4", "m5", "m6"]
        );
    }

    #[test]
    fn test_affordance_forwarded_as_placeholder() {
        let messages = vec![
            UiMessage::text(Role::User, "I have chest pain"),
            UiMessage::text(Role::Assistant, "Call emergency services."),
            UiMessage::emergency(),
        ];

        let history = build_history(&messages, 6);
        assert_eq!(history[2].role, Role::Assistant);
        assert_eq!(history[2].content, NON_TEXT_PLACEHOLDER);
    }
}
