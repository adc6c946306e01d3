//! # Middleware
//!
//! Axum middleware and extractors for caller identity, request stamping, and logging.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Bearer identity extractors ([`Caller`], [`MaybeCaller`])
//! - **[`mw_req_stamp`]**: Request ID and timestamp stamping
//! - **[`mw_logging`]**: Request/response logging

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_req_stamp;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{Caller, MaybeCaller};
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
// endregion: --- Re-exports
