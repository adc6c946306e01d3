//! In-process [`ChatBackend`] for controller tests.

use crate::backend::{ChatBackend, Identity};
use crate::{ClientError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    ChatRequest, ChatResponse, ConversationSummary, CreateMessageRequest, Hospital,
    HospitalSearchRequest, StoredMessage,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
pub struct FakeBackend {
    /// Oldest first; listed in reverse.
    conversations: Mutex<Vec<ConversationSummary>>,
    messages: Mutex<HashMap<String, Vec<StoredMessage>>>,
    reply: Mutex<Option<ChatResponse>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub appended: Mutex<Vec<CreateMessageRequest>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failing: Mutex<HashSet<&'static str>>,
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
    next_id: Mutex<u32>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity() -> Identity {
        Identity::new("test-token", "alice")
    }

    pub fn seed_conversation(&self, id: &str, title: &str) {
        self.conversations.lock().push(ConversationSummary {
            id: id.to_string(),
            title: title.to_string(),
        });
        self.messages.lock().entry(id.to_string()).or_default();
    }

    pub fn seed_message(&self, id: &str, role: shared::Role, content: &str, emergency: bool) {
        self.messages
            .lock()
            .entry(id.to_string())
            .or_default()
            .push(StoredMessage {
                role,
                content: content.to_string(),
                is_emergency_prompt: emergency,
            });
    }

    pub fn set_reply(&self, answer: &str, emergency_flag: bool) {
        *self.reply.lock() = Some(ChatResponse {
            answer: answer.to_string(),
            emergency_flag,
        });
    }

    pub fn fail_on(&self, call: &'static str) {
        self.failing.lock().insert(call);
    }

    /// Make `call` wait until the returned `Notify` is signalled.
    pub fn hold(&self, call: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().insert(call, gate.clone());
        gate
    }

    pub fn calls(&self, call: &str) -> usize {
        self.calls.lock().get(call).copied().unwrap_or(0)
    }

    pub fn stored(&self, id: &str) -> Vec<StoredMessage> {
        self.messages.lock().get(id).cloned().unwrap_or_default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.conversations.lock().iter().map(|c| c.title.clone()).collect()
    }

    async fn enter(&self, call: &'static str) -> Result<()> {
        *self.calls.lock().entry(call).or_default() += 1;

        let gate = self.gates.lock().remove(call);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.lock().contains(call) {
            return Err(match call {
                "history" | "rename_conversation" | "delete_conversation" => ClientError::NotFound,
                _ => ClientError::Upstream(format!("{} failed", call)),
            });
        }
        Ok(())
    }

    fn owned(&self, id: &str) -> Result<()> {
        if self.conversations.lock().iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(ClientError::NotFound)
        }
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn create_conversation(
        &self,
        _identity: &Identity,
        title: &str,
    ) -> Result<ConversationSummary> {
        self.enter("create_conversation").await?;

        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            format!("conv-{}", *next)
        };
        self.seed_conversation(&id, title);
        Ok(ConversationSummary {
            id,
            title: title.to_string(),
        })
    }

    async fn list_conversations(&self, _identity: &Identity) -> Result<Vec<ConversationSummary>> {
        self.enter("list_conversations").await?;
        Ok(self.conversations.lock().iter().rev().cloned().collect())
    }

    async fn rename_conversation(
        &self,
        _identity: &Identity,
        id: &str,
        title: &str,
    ) -> Result<ConversationSummary> {
        self.enter("rename_conversation").await?;
        self.owned(id)?;

        let mut conversations = self.conversations.lock();
        let item = conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ClientError::NotFound)?;
        item.title = title.to_string();
        Ok(item.clone())
    }

    async fn delete_conversation(&self, _identity: &Identity, id: &str) -> Result<()> {
        self.enter("delete_conversation").await?;
        self.owned(id)?;

        self.conversations.lock().retain(|c| c.id != id);
        self.messages.lock().remove(id);
        Ok(())
    }

    async fn history(&self, _identity: &Identity, id: &str) -> Result<Vec<StoredMessage>> {
        self.enter("history").await?;
        self.owned(id)?;
        Ok(self.stored(id))
    }

    async fn append_message(
        &self,
        _identity: &Identity,
        message: &CreateMessageRequest,
    ) -> Result<()> {
        self.enter("append_message").await?;
        self.owned(&message.conversation_id)?;

        self.appended.lock().push(message.clone());
        self.seed_message(
            &message.conversation_id,
            message.role,
            &message.content,
            message.is_emergency_prompt.unwrap_or(false),
        );
        Ok(())
    }

    async fn chat(&self, _identity: Option<&Identity>, request: &ChatRequest) -> Result<ChatResponse> {
        self.chat_requests.lock().push(request.clone());
        self.enter("chat").await?;

        Ok(self.reply.lock().clone().unwrap_or_else(|| ChatResponse {
            answer: format!("About \"{}\": stay calm.", request.message),
            emergency_flag: false,
        }))
    }

    async fn find_hospitals(&self, _request: &HospitalSearchRequest) -> Result<Vec<Hospital>> {
        self.enter("find_hospitals").await?;
        Ok(Vec::new())
    }
}
