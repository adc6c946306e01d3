//! # Gateway API Client Module
//!
//! HTTP client for communicating with the axum gateway.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports
//! ├── client.rs        - ApiClient, response decoding, ChatBackend impl
//! ├── auth.rs          - Login and signup
//! ├── conversations.rs - Conversation CRUD, history and message writes
//! ├── chat.rs          - AI turn and title generation
//! └── hospitals.rs     - Nearest hospital lookup
//! ```

pub mod auth;
pub mod chat;
pub mod client;
pub mod conversations;
pub mod hospitals;

pub use client::ApiClient;
