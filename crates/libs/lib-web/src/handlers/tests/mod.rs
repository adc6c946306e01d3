//! # Handler Tests
//!
//! Drive the full router (middleware included) against an in-memory store and a
//! stub AI responder.

mod chat;
mod messages;
mod title;

use crate::server::{create_router, AppState};
use crate::services::AiResponder;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::{connect_in_memory, AppError, Config, DbPool};
use serde_json::{json, Value};
use shared::dto::{ChatResponse, HistoryEntry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_hours: 24,
        ai_api_endpoint: None,
        ai_timeout_secs: 5,
        hospital_result_limit: 10,
    }
}

/// AI responder with canned replies that records what it was asked.
pub struct StubResponder {
    pub reply: ChatResponse,
    pub title: String,
    pub fail: bool,
    pub answer_calls: AtomicUsize,
    pub title_calls: AtomicUsize,
    pub last_history: Mutex<Vec<HistoryEntry>>,
}

impl StubResponder {
    pub fn new(answer: &str, emergency: bool) -> Self {
        Self {
            reply: ChatResponse {
                answer: answer.to_string(),
                emergency_flag: emergency,
            },
            title: "Stub Title".to_string(),
            fail: false,
            answer_calls: AtomicUsize::new(0),
            title_calls: AtomicUsize::new(0),
            last_history: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("", false)
        }
    }
}

#[async_trait]
impl AiResponder for StubResponder {
    async fn answer(&self, _message: &str, history: &[HistoryEntry]) -> lib_core::Result<ChatResponse> {
        self.answer_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history.lock().unwrap() = history.to_vec();
        if self.fail {
            return Err(AppError::Upstream("stub failure".to_string()));
        }
        Ok(self.reply.clone())
    }

    async fn title(&self, _message: &str) -> lib_core::Result<String> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Upstream("stub failure".to_string()));
        }
        Ok(self.title.clone())
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    pub ai: Arc<StubResponder>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_responder(StubResponder::new("Stay calm.", false)).await
    }

    pub async fn with_responder(stub: StubResponder) -> Self {
        let pool = connect_in_memory().await.unwrap();
        let ai = Arc::new(stub);

        let state = AppState {
            db: pool.clone(),
            config: test_config(),
            ai: ai.clone() as Arc<dyn AiResponder>,
        };

        Self {
            router: create_router(state, &["http://localhost:3000".to_string()]),
            pool,
            ai,
        }
    }

    /// Send a request and decode the JSON body (`Null` when the body is not JSON).
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Sign up `username` and return its bearer token.
    pub async fn token_for(&self, username: &str) -> String {
        let (status, body) = self
            .call(
                "POST",
                "/api/auth/signup",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": TEST_PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a conversation and return its id.
    pub async fn conversation(&self, token: &str, title: &str) -> String {
        let (status, body) = self
            .call(
                "POST",
                "/api/conversations",
                Some(token),
                Some(json!({ "title": title })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_and_fallback() {
    let app = TestApp::new().await;

    let (status, _) = app.call("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.call("GET", "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "probe-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "probe-1");
}
