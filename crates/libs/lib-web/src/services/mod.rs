//! # Services Layer
//!
//! Integrations the handlers delegate to.
//!
//! ```text
//! Handlers (HTTP) → Services (AI responder) → external AI service
//!                 → Repositories (lib-core)  → SQLite
//! ```
//!
//! - [`ai_responder`] - The [`AiResponder`] trait, its HTTP implementation, and the
//!   keyword fallback used when no AI service is configured

pub mod ai_responder;

pub use ai_responder::{AiResponder, HttpAiResponder, KeywordResponder, Severity};
