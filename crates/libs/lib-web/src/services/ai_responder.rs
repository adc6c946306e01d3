//! # AI Responder
//!
//! Client side of the external AI inference service.
//!
//! The gateway only renames fields between the browser shape and the AI shape:
//!
//! | Browser (`/api/chat`) | AI service (`POST {AI_API_ENDPOINT}`) |
//! |---|---|
//! | `message` | `query` |
//! | `history[]` | `history[]` |
//! | `answer` | `answer` |
//! | `emergencyFlag` | `show_hospital_modal` |
//!
//! Titles go to `POST {base}/generate-title` with `{query}` and come back as
//! `{title}`.
//!
//! When no AI endpoint is configured the gateway falls back to
//! [`KeywordResponder`], a deterministic stand-in that flags a fixed set of
//! critical phrases.

use async_trait::async_trait;
use lib_core::{AppError, Config, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::dto::{ChatResponse, HistoryEntry};
use shared::utils::derive_title;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Access to an AI service able to answer first-aid questions.
#[async_trait]
pub trait AiResponder: Send + Sync {
    /// Answer `message` given prior `history` (oldest first, text only).
    async fn answer(&self, message: &str, history: &[HistoryEntry]) -> Result<ChatResponse>;

    /// Produce a short conversation title for a first message.
    async fn title(&self, message: &str) -> Result<String>;
}

// region: --- HTTP responder

#[derive(Debug, Serialize)]
struct UpstreamAskRequest<'a> {
    query: &'a str,
    history: &'a [HistoryEntry],
}

#[derive(Debug, Deserialize)]
struct UpstreamAskResponse {
    answer: Option<String>,
    #[serde(default)]
    show_hospital_modal: bool,
}

#[derive(Debug, Serialize)]
struct UpstreamTitleRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct UpstreamTitleResponse {
    title: Option<String>,
}

/// Responder backed by the external AI HTTP service.
pub struct HttpAiResponder {
    client: reqwest::Client,
    answer_url: String,
    title_url: String,
}

impl HttpAiResponder {
    pub fn new(answer_url: String, title_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build AI HTTP client: {}", e)))?;

        Ok(Self {
            client,
            answer_url,
            title_url,
        })
    }

    /// Build from config; `None` when no AI endpoint is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        match (&config.ai_api_endpoint, config.ai_title_endpoint()) {
            (Some(answer_url), Some(title_url)) => Self::new(
                answer_url.clone(),
                title_url,
                Duration::from_secs(config.ai_timeout_secs),
            )
            .map(Some),
            _ => Ok(None),
        }
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("AI request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), url, "AI service returned an error");
            return Err(AppError::Upstream(format!(
                "AI service answered {}: {}",
                status.as_u16(),
                text
            )));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| AppError::Upstream(format!("AI response could not be decoded: {}", e)))
    }
}

#[async_trait]
impl AiResponder for HttpAiResponder {
    #[instrument(skip(self, message, history), fields(history_len = history.len()))]
    async fn answer(&self, message: &str, history: &[HistoryEntry]) -> Result<ChatResponse> {
        let body = UpstreamAskRequest {
            query: message,
            history,
        };
        let reply: UpstreamAskResponse = self.post_json(&self.answer_url, &body).await?;

        debug!(emergency = reply.show_hospital_modal, "AI answer received");

        let answer = reply
            .answer
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| AppError::Upstream("AI service returned no answer".to_string()))?;

        Ok(ChatResponse {
            answer,
            emergency_flag: reply.show_hospital_modal,
        })
    }

    #[instrument(skip(self, message))]
    async fn title(&self, message: &str) -> Result<String> {
        let reply: UpstreamTitleResponse = self
            .post_json(&self.title_url, &UpstreamTitleRequest { query: message })
            .await?;

        reply
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Upstream("AI service returned an empty title".to_string()))
    }
}

// endregion: --- HTTP responder

// region: --- Keyword responder

/// Phrases that mark a message as a critical emergency.
const CRITICAL_PHRASES: &[&str] = &["chest pain", "can't breathe", "stroke", "severe bleeding"];

/// Phrases for injuries that need first aid but not an emergency room.
const MEDIUM_PHRASES: &[&str] = &["cut", "burn", "sprain"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    Critical,
}

impl Severity {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase().replace('\u{2019}', "'");
        if CRITICAL_PHRASES.iter().any(|p| lower.contains(p)) {
            Severity::Critical
        } else if MEDIUM_PHRASES.iter().any(|p| lower.contains(p)) {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    fn answer(&self) -> &'static str {
        match self {
            Severity::Critical => {
                "Based on your description, this could be a critical emergency. It is important to \
                 seek professional medical help immediately. While you wait for help to arrive, \
                 keep the person still, stay with them and follow the dispatcher's instructions."
            }
            Severity::Medium => {
                "This sounds like an injury you can start treating yourself. Clean the area, apply \
                 gentle pressure or cool running water as appropriate, and see a clinician if it \
                 does not improve."
            }
            Severity::Low => {
                "I can help with general first-aid questions. Describe the symptoms or injury and \
                 I will walk you through the first steps."
            }
        }
    }
}

/// Deterministic responder used when no AI service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponder;

#[async_trait]
impl AiResponder for KeywordResponder {
    async fn answer(&self, message: &str, _history: &[HistoryEntry]) -> Result<ChatResponse> {
        let severity = Severity::classify(message);
        debug!(?severity, "keyword responder classified message");

        Ok(ChatResponse {
            answer: severity.answer().to_string(),
            emergency_flag: severity == Severity::Critical,
        })
    }

    async fn title(&self, message: &str) -> Result<String> {
        Ok(derive_title(message, 5, 30))
    }
}

// endregion: --- Keyword responder

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};
    use shared::dto::Role;

    #[test]
    fn test_classify_severity() {
        assert_eq!(Severity::classify("I have CHEST PAIN"), Severity::Critical);
        assert_eq!(Severity::classify("he can\u{2019}t breathe"), Severity::Critical);
        assert_eq!(Severity::classify("small cut on my finger"), Severity::Medium);
        assert_eq!(Severity::classify("how do I stay hydrated"), Severity::Low);
    }

    #[tokio::test]
    async fn test_keyword_responder_flags_critical() {
        let reply = KeywordResponder.answer("Sudden severe bleeding", &[]).await.unwrap();
        assert!(reply.emergency_flag);

        let reply = KeywordResponder.answer("I burned my arm", &[]).await.unwrap();
        assert!(!reply.emergency_flag);
        assert!(!reply.answer.is_empty());
    }

    /// Serve a fake AI service on an ephemeral port.
    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_http_responder_renames_fields() {
        let router = Router::new()
            .route(
                "/ask",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["query"], "I have chest pain");
                    assert_eq!(body["history"][0]["role"], "user");
                    Json(json!({ "answer": "Call now", "show_hospital_modal": true }))
                }),
            )
            .route(
                "/generate-title",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["query"], "I have chest pain");
                    Json(json!({ "title": "  Chest pain  " }))
                }),
            );
        let base = spawn_upstream(router).await;

        let responder = HttpAiResponder::new(
            format!("{}/ask", base),
            format!("{}/generate-title", base),
            Duration::from_secs(5),
        )
        .unwrap();

        let history = vec![HistoryEntry {
            role: Role::User,
            content: "earlier".to_string(),
        }];
        let reply = responder.answer("I have chest pain", &history).await.unwrap();
        assert_eq!(reply.answer, "Call now");
        assert!(reply.emergency_flag);

        let title = responder.title("I have chest pain").await.unwrap();
        assert_eq!(title, "Chest pain");
    }

    #[tokio::test]
    async fn test_http_responder_non_success_is_upstream_error() {
        let router = Router::new().route(
            "/ask",
            post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let base = spawn_upstream(router).await;

        let responder = HttpAiResponder::new(
            format!("{}/ask", base),
            format!("{}/generate-title", base),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = responder.answer("hello", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_http_responder_missing_answer_is_upstream_error() {
        let router = Router::new().route(
            "/ask",
            post(|| async { Json(json!({ "answer": null, "show_hospital_modal": true })) }),
        );
        let base = spawn_upstream(router).await;

        let responder = HttpAiResponder::new(
            format!("{}/ask", base),
            format!("{}/generate-title", base),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = responder.answer("hello", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn test_from_config_without_endpoint() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "x".repeat(32),
            jwt_expiration_hours: 1,
            ai_api_endpoint: None,
            ai_timeout_secs: 5,
            hospital_result_limit: 10,
        };
        assert!(HttpAiResponder::from_config(&config).unwrap().is_none());
    }
}
