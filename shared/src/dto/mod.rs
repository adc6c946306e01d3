//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the chat client and the gateway via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Signup, login and error responses
//! - [`conversation`] - Conversation list, history rows and message writes
//! - [`chat`] - AI turns and title generation
//! - [`hospital`] - Nearest hospital lookup
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase via `#[serde(rename_all = "camelCase")]`
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/chat
//! Content-Type: application/json
//!
//! {
//!   "message": "I have chest pain",
//!   "history": []
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "answer": "Call emergency services now...",
//!   "emergencyFlag": true
//! }
//! ```

pub mod auth;
pub mod chat;
pub mod conversation;
pub mod hospital;

pub use auth::*;
pub use chat::*;
pub use conversation::*;
pub use hospital::*;
