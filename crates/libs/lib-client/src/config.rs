//! # Client Configuration
//!
//! [`ClientConfig`] points the HTTP client at a gateway. [`SessionConfig`] holds the
//! knobs of the chat session: history window, reveal pacing, title derivation and
//! what a failed conversation load does.

use lib_utils::{get_env_or, get_env_parse_or};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway origin, without the `/api` prefix.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Read `FIRST_AID_API_URL` and `FIRST_AID_API_TIMEOUT_SECS`.
    pub fn from_env() -> crate::Result<Self> {
        let base_url = get_env_or("FIRST_AID_API_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let timeout_secs: u64 = get_env_parse_or("FIRST_AID_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// What [`crate::ChatSession::load`] does when the history fetch fails.
///
/// Both policies reset the session to a fresh chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadFailurePolicy {
    /// Return `Ok(())` and only log the failure.
    #[default]
    ResetSilently,
    /// Emit [`crate::SessionEvent::LoadFailed`] and return the error.
    Surface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Number of prior messages forwarded to the AI with each turn.
    pub history_window: usize,
    pub reveal_tick: Duration,
    pub chars_per_tick: usize,
    pub title_words: usize,
    pub title_chars: usize,
    pub load_failure: LoadFailurePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_window: 6,
            reveal_tick: Duration::from_millis(5),
            chars_per_tick: 1,
            title_words: 5,
            title_chars: 30,
            load_failure: LoadFailurePolicy::ResetSilently,
        }
    }
}
