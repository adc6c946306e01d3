//! # Shared Utility Functions
//!
//! Text helpers used by both the gateway and the chat client.
//!
//! ## Titles
//!
//! - [`derive_title`] - Build a short conversation title from the first message
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::derive_title;
//!
//! let title = derive_title("I burned my hand on the stove this morning", 5, 30);
//! assert_eq!(title, "I burned my hand on...");
//! ```

/// Ellipsis appended when a title was shortened.
pub const TITLE_ELLIPSIS: &str = "...";

/// Build a conversation title from a message.
///
/// Keeps the first `max_words` whitespace-separated words, then caps the result at
/// `max_chars` characters. [`TITLE_ELLIPSIS`] is appended only when something was
/// dropped. Character counting is by `char`, so multi-byte input never splits.
///
/// # Examples
///
/// ```rust
/// use shared::utils::derive_title;
///
/// assert_eq!(derive_title("Bee sting", 5, 30), "Bee sting");
/// assert_eq!(derive_title("  spaced   out  ", 5, 30), "spaced out");
/// assert_eq!(
///     derive_title("Pneumonoultramicroscopicsilicovolcanoconiosis", 5, 30),
///     "Pneumonoultramicroscopicsilico..."
/// );
/// ```
pub fn derive_title(text: &str, max_words: usize, max_chars: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut truncated = words.len() > max_words;
    let joined = words
        .iter()
        .take(max_words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let title: String = if joined.chars().count() > max_chars {
        truncated = true;
        joined.chars().take(max_chars).collect::<String>().trim_end().to_string()
    } else {
        joined
    };

    if truncated {
        format!("{}{}", title, TITLE_ELLIPSIS)
    } else {
        title
    }
}
