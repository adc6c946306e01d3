//! # Backend Trait
//!
//! Everything the chat session and the sidebar need from the gateway. The
//! session and the list take an `Arc<dyn ChatBackend>` at construction, so tests
//! swap the HTTP client for an in-process fake.

use crate::Result;
use async_trait::async_trait;
use shared::{
    AuthResponse, ChatRequest, ChatResponse, ConversationSummary, CreateMessageRequest,
    Hospital, HospitalSearchRequest, StoredMessage,
};

/// A signed-in caller: the bearer token issued at login plus a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token: String,
    pub username: String,
}

impl Identity {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}

impl From<&AuthResponse> for Identity {
    fn from(response: &AuthResponse) -> Self {
        Self::new(response.token.clone(), response.user.username.clone())
    }
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn create_conversation(
        &self,
        identity: &Identity,
        title: &str,
    ) -> Result<ConversationSummary>;

    /// Newest first.
    async fn list_conversations(&self, identity: &Identity) -> Result<Vec<ConversationSummary>>;

    async fn rename_conversation(
        &self,
        identity: &Identity,
        id: &str,
        title: &str,
    ) -> Result<ConversationSummary>;

    async fn delete_conversation(&self, identity: &Identity, id: &str) -> Result<()>;

    /// Stored rows in creation order.
    async fn history(&self, identity: &Identity, id: &str) -> Result<Vec<StoredMessage>>;

    async fn append_message(&self, identity: &Identity, message: &CreateMessageRequest)
        -> Result<()>;

    async fn chat(&self, identity: Option<&Identity>, request: &ChatRequest)
        -> Result<ChatResponse>;

    async fn find_hospitals(&self, request: &HospitalSearchRequest) -> Result<Vec<Hospital>>;
}
