//! # Conversation List Controller
//!
//! The sidebar: the caller's conversations newest first, rename in place and
//! confirmed delete. A deletion is reported to a [`ConversationObserver`] (the
//! chat session) so an open conversation never outlives its row.

use crate::backend::{ChatBackend, Identity};
use crate::refresh::RefreshToken;
use crate::{ClientError, Result};
use parking_lot::RwLock;
use shared::ConversationSummary;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Told about conversations removed through the list.
pub trait ConversationObserver: Send + Sync {
    fn conversation_deleted(&self, id: &str);
}

pub struct ConversationList {
    backend: Arc<dyn ChatBackend>,
    identity: Option<Identity>,
    refresh: RefreshToken,
    observer: Option<Arc<dyn ConversationObserver>>,
    items: RwLock<Vec<ConversationSummary>>,
    /// Refresh token value at the last fetch.
    seen: AtomicU64,
}

impl ConversationList {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        identity: Option<Identity>,
        refresh: RefreshToken,
    ) -> Self {
        Self {
            backend,
            identity,
            refresh,
            observer: None,
            items: RwLock::new(Vec::new()),
            seen: AtomicU64::new(0),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Last fetched list, without a network call.
    pub fn items(&self) -> Vec<ConversationSummary> {
        self.items.read().clone()
    }

    /// Fetch the list, newest first. Empty without an identity.
    pub async fn list(&self) -> Result<Vec<ConversationSummary>> {
        let token = self.refresh.current();

        let Some(identity) = &self.identity else {
            self.items.write().clear();
            self.seen.store(token, Ordering::SeqCst);
            return Ok(Vec::new());
        };

        let items = self.backend.list_conversations(identity).await?;
        debug!(count = items.len(), "Conversation list fetched");

        *self.items.write() = items.clone();
        self.seen.store(token, Ordering::SeqCst);
        Ok(items)
    }

    /// Re-fetch if the refresh token moved since the last fetch.
    /// Returns whether a fetch happened.
    pub async fn refresh_if_stale(&self) -> Result<bool> {
        if self.refresh.current() == self.seen.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.list().await?;
        Ok(true)
    }

    /// Rename a conversation. A blank title is rejected before any request.
    pub async fn rename(&self, id: &str, title: &str) -> Result<ConversationSummary> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ClientError::Validation("Title is required".to_string()));
        }
        let identity = self.require_identity()?;

        let updated = self.backend.rename_conversation(identity, id, title).await?;

        if let Some(item) = self.items.write().iter_mut().find(|c| c.id == id) {
            item.title = updated.title.clone();
        }
        Ok(updated)
    }

    /// Delete a conversation once `confirm` approves it.
    ///
    /// `confirm` receives the conversation's title and resolves once the user
    /// has answered. Returns `Ok(false)` when the user declined.
    pub async fn delete<F, Fut>(&self, id: &str, confirm: F) -> Result<bool>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = bool>,
    {
        let identity = self.require_identity()?;

        let title = self
            .items
            .read()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| "this chat".to_string());
        if !confirm(title).await {
            debug!(conversation_id = %id, "Delete declined");
            return Ok(false);
        }

        self.backend.delete_conversation(identity, id).await?;
        info!(conversation_id = %id, "Conversation deleted");

        self.items.write().retain(|c| c.id != id);
        if let Some(observer) = &self.observer {
            observer.conversation_deleted(id);
        }
        self.refresh.bump();
        Ok(true)
    }

    fn require_identity(&self) -> Result<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| ClientError::Unauthorized("Sign in to manage conversations".to_string()))
    }
}
