//! # Authentication Library
//!
//! Password hashing, JWT session tokens, and caller identity resolution.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_password, MIN_PASSWORD_LEN};
pub use token::{bearer_token, decode_jwt, encode_jwt, resolve_user_id, Claims};
