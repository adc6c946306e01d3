//! # Conversation Endpoints
//!
//! Owner-scoped conversation and message routes. Every call carries the
//! caller's bearer token.

use super::client::{decode, ApiClient};
use crate::backend::Identity;
use crate::Result;
use shared::{
    ConversationSummary, CreateConversationRequest, CreateMessageRequest,
    RenameConversationRequest, StoredMessage, SuccessResponse,
};

#[tracing::instrument(skip(client, identity))]
pub async fn create(
    client: &ApiClient,
    identity: &Identity,
    title: &str,
) -> Result<ConversationSummary> {
    let response = client
        .client
        .post(client.url("/conversations"))
        .bearer_auth(&identity.token)
        .json(&CreateConversationRequest {
            title: title.to_string(),
        })
        .send()
        .await?;

    let summary: ConversationSummary = decode(response).await?;
    tracing::debug!(conversation_id = %summary.id, "Conversation created");
    Ok(summary)
}

pub async fn list(client: &ApiClient, identity: &Identity) -> Result<Vec<ConversationSummary>> {
    let response = client
        .client
        .get(client.url("/conversations"))
        .bearer_auth(&identity.token)
        .send()
        .await?;

    decode(response).await
}

pub async fn rename(
    client: &ApiClient,
    identity: &Identity,
    id: &str,
    title: &str,
) -> Result<ConversationSummary> {
    let response = client
        .client
        .patch(client.url(&format!("/conversations/{}", id)))
        .bearer_auth(&identity.token)
        .json(&RenameConversationRequest {
            title: Some(title.to_string()),
        })
        .send()
        .await?;

    decode(response).await
}

pub async fn delete(client: &ApiClient, identity: &Identity, id: &str) -> Result<()> {
    let response = client
        .client
        .delete(client.url(&format!("/conversations/{}", id)))
        .bearer_auth(&identity.token)
        .send()
        .await?;

    decode::<SuccessResponse>(response).await.map(|_| ())
}

pub async fn history(
    client: &ApiClient,
    identity: &Identity,
    id: &str,
) -> Result<Vec<StoredMessage>> {
    let response = client
        .client
        .get(client.url(&format!("/conversations/{}", id)))
        .bearer_auth(&identity.token)
        .send()
        .await?;

    decode(response).await
}

#[tracing::instrument(skip(client, identity, message), fields(conversation_id = %message.conversation_id, role = %message.role))]
pub async fn append_message(
    client: &ApiClient,
    identity: &Identity,
    message: &CreateMessageRequest,
) -> Result<()> {
    let response = client
        .client
        .post(client.url("/messages"))
        .bearer_auth(&identity.token)
        .json(message)
        .send()
        .await?;

    decode::<SuccessResponse>(response).await.map(|_| ())
}
