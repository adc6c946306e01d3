//! # Web Library
//!
//! API gateway: HTTP handlers, identity extraction, middleware, routes, and the
//! AI responder client.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod services;

pub use server::{build_responder, create_router, init_tracing, start_server, AppState, ServerConfig};
