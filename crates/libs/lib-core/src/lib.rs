//! # Core Library
//!
//! Configuration, error taxonomy, and the owner-scoped conversation store.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{connect_in_memory, create_pool, run_migrations, DbPool};
