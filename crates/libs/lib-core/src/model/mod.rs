//! # Model Layer
//!
//! Database entities and repositories.

pub mod store;
