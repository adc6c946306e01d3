//! # Client Error Types
//!
//! Error taxonomy shared by the HTTP client, the chat session and the sidebar.
//!
//! ## Error Categories
//!
//! - **Unauthorized**: no identity, or the gateway rejected the token
//! - **NotFound**: the conversation is missing or owned by someone else
//! - **Validation**: rejected input, either locally or by the gateway (400/409/422)
//! - **Upstream**: the gateway or one of its collaborators failed (5xx, unreadable body)
//! - **Network**: the request never completed
//! - **Busy**: a turn is already awaiting the AI
//! - **Cancelled**: the result arrived after a newer operation superseded it

use thiserror::Error;

pub type Result<T> = core::result::Result<T, ClientError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conversation not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("A reply is still on its way")]
    Busy,

    #[error("Superseded by a newer request")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map a non-success gateway status and its `error` message.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized(message),
            404 => ClientError::NotFound,
            400 | 409 | 422 => ClientError::Validation(message),
            500..=599 => ClientError::Upstream(message),
            _ => ClientError::Upstream(format!("HTTP {}: {}", status, message)),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Upstream(format!("Failed to parse response: {}", err))
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<lib_utils::envs::Error> for ClientError {
    fn from(err: lib_utils::envs::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ClientError::from_status(401, "Unauthorized".into()),
            ClientError::Unauthorized("Unauthorized".into())
        );
        assert_eq!(ClientError::from_status(404, "gone".into()), ClientError::NotFound);
        assert_eq!(
            ClientError::from_status(409, "Email already registered".into()),
            ClientError::Validation("Email already registered".into())
        );
        assert_eq!(
            ClientError::from_status(502, "AI service unavailable".into()),
            ClientError::Upstream("AI service unavailable".into())
        );
        assert_eq!(
            ClientError::from_status(418, "teapot".into()),
            ClientError::Upstream("HTTP 418: teapot".into())
        );
    }
}
