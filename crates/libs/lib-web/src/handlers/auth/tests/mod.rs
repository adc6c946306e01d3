//! # Auth Handler Tests
//!
//! Test suite for authentication handlers (signup and login).

mod signup;

use super::*;
use crate::handlers::tests::test_config;
use crate::server::AppState;
use crate::services::KeywordResponder;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use lib_core::connect_in_memory;
use shared::dto::ErrorResponse;
use std::sync::Arc;
use tower::ServiceExt;

/// Setup test database with schema
pub async fn setup_test_db() -> DbPool {
    connect_in_memory()
        .await
        .expect("Failed to create test database")
}

/// Create test app with the auth routes only
pub fn test_app(pool: DbPool, config: Config) -> Router {
    let state = AppState {
        db: pool,
        config,
        ai: Arc::new(KeywordResponder),
    };

    Router::new()
        .route("/signup", axum::routing::post(signup))
        .route("/login", axum::routing::post(login))
        .with_state(state)
}

/// POST `body` as JSON to `uri` and return status plus raw body.
pub async fn post_json<B: serde::Serialize>(app: Router, uri: &str, body: &B) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

/// Insert a user directly, bypassing the handler.
pub async fn create_user(pool: &DbPool, username: &str, email: &str, password: &str) -> User {
    let password_hash = hash_password(password).expect("Password hashing should succeed in test");
    UserRepository::create(
        pool,
        UserForCreate::new(username.to_string(), email.to_string(), password_hash),
    )
    .await
    .expect("User creation should succeed in test")
}
