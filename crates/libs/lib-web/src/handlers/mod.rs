//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Handlers validate input, resolve the
//! caller and delegate storage to the repositories in `lib_core::model::store`.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: account endpoints
//!   - `POST /api/auth/signup` - Create new user account
//!   - `POST /api/auth/login` - Authenticate with email or username
//!
//! - **[`conversations`]**: conversation lifecycle
//!   - `POST /api/conversations`, `GET /api/conversations`
//!   - `PATCH /api/conversations/{id}`, `DELETE /api/conversations/{id}`
//!   - `GET /api/conversations/{id}` - message history
//!
//! - **[`messages`]**: `POST /api/messages`
//! - **[`chat`]**: `POST /api/chat` - one AI turn
//! - **[`title`]**: `POST /api/title` - AI-generated conversation title
//! - **[`hospitals`]**: `POST /api/hospitals` - nearest hospitals
//!
//! ## Handler Architecture
//!
//! ```rust,ignore
//! async fn handler(
//!     State(pool): State<DbPool>,          // Shared state
//!     caller: Caller,                      // Bearer identity, 401 when absent
//!     Json(payload): Json<RequestBody>,    // Request body
//! ) -> lib_core::Result<Json<Response>> {
//!     Ok(Json(response))
//! }
//! ```
//!
//! ## Error Handling
//!
//! Handlers return `lib_core::Result<T>`; [`lib_core::AppError`] renders itself as
//! `{"error": ..., "code": ...}` with the matching status.

pub mod auth;
pub mod chat;
pub mod conversations;
pub mod hospitals;
pub mod messages;
pub mod title;

#[cfg(test)]
mod tests;
