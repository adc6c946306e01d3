//! # API Client
//!
//! Main HTTP client for gateway communication.

use crate::api::{auth, chat, conversations, hospitals};
use crate::backend::{ChatBackend, Identity};
use crate::config::ClientConfig;
use crate::{ClientError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    AuthResponse, ChatRequest, ChatResponse, ConversationSummary, CreateMessageRequest,
    ErrorResponse, Hospital, HospitalSearchRequest, StoredMessage, TitleResponse,
};

/// HTTP client for communicating with the gateway.
///
/// Holds one connection pool; clone the `Arc` it usually lives in rather than
/// building a second client.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of an `/api` route.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn login(&self, email_or_username: String, password: String) -> Result<AuthResponse> {
        auth::login(self, email_or_username, password).await
    }

    pub async fn signup(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<AuthResponse> {
        auth::signup(self, username, email, password).await
    }

    pub async fn generate_title(
        &self,
        identity: &Identity,
        conversation_id: &str,
        message: &str,
    ) -> Result<TitleResponse> {
        chat::generate_title(self, identity, conversation_id, message).await
    }
}

/// Decode a success body as `T`, or turn the gateway's `{error}` body into a
/// [`ClientError`].
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Upstream(format!("Failed to parse response: {}", e)));
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    tracing::warn!(status = status.as_u16(), error = %message, "Gateway rejected request");
    Err(ClientError::from_status(status.as_u16(), message))
}

#[async_trait::async_trait]
impl ChatBackend for ApiClient {
    async fn create_conversation(
        &self,
        identity: &Identity,
        title: &str,
    ) -> Result<ConversationSummary> {
        conversations::create(self, identity, title).await
    }

    async fn list_conversations(&self, identity: &Identity) -> Result<Vec<ConversationSummary>> {
        conversations::list(self, identity).await
    }

    async fn rename_conversation(
        &self,
        identity: &Identity,
        id: &str,
        title: &str,
    ) -> Result<ConversationSummary> {
        conversations::rename(self, identity, id, title).await
    }

    async fn delete_conversation(&self, identity: &Identity, id: &str) -> Result<()> {
        conversations::delete(self, identity, id).await
    }

    async fn history(&self, identity: &Identity, id: &str) -> Result<Vec<StoredMessage>> {
        conversations::history(self, identity, id).await
    }

    async fn append_message(
        &self,
        identity: &Identity,
        message: &CreateMessageRequest,
    ) -> Result<()> {
        conversations::append_message(self, identity, message).await
    }

    async fn chat(&self, identity: Option<&Identity>, request: &ChatRequest) -> Result<ChatResponse> {
        chat::chat(self, identity, request).await
    }

    async fn find_hospitals(&self, request: &HospitalSearchRequest) -> Result<Vec<Hospital>> {
        hospitals::find_hospitals(self, request).await
    }
}
