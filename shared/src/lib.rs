//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the chat client and the API gateway.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Signup, login and error bodies
//!   - **[`dto::conversation`]**: Conversations, stored messages and acknowledgements
//!   - **[`dto::chat`]**: AI turn and title generation bodies
//!   - **[`dto::hospital`]**: Hospital search bodies
//! - **[`utils`]**: Shared text helpers
//!   - **[`utils::derive_title`]**: Build a conversation title from a first message
//!
//! ## Wire Format
//!
//! Field names are **camelCase** on the wire (`conversationId`, `isEmergencyPrompt`,
//! `emergencyFlag`, `distanceMeters`). Request bodies also accept the snake_case
//! spelling through `#[serde(alias = ...)]` so older callers keep working.
//!
//! ## Usage in the Gateway
//!
//! ```rust,ignore
//! use shared::dto::chat::{ChatRequest, ChatResponse};
//! use axum::Json;
//!
//! async fn chat(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
//!     # todo!()
//! }
//! ```
//!
//! ## Usage in the Client
//!
//! ```rust,ignore
//! use shared::dto::conversation::ConversationSummary;
//!
//! # async fn run() -> Result<(), reqwest::Error> {
//! let list: Vec<ConversationSummary> = reqwest::Client::new()
//!     .get("http://localhost:3001/api/conversations")
//!     .bearer_auth("token")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where every export is public API
pub use dto::*;
pub use utils::*;
