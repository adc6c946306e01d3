//! # Chat Endpoints
//!
//! One AI turn and AI title generation.

use super::client::{decode, ApiClient};
use crate::backend::Identity;
use crate::Result;
use shared::{ChatRequest, ChatResponse, TitleRequest, TitleResponse};

/// Send one message plus its history window to the AI.
///
/// The gateway accepts anonymous turns, so the token is attached only when present.
#[tracing::instrument(skip(client, identity, request), fields(history_len = request.history.len()))]
pub async fn chat(
    client: &ApiClient,
    identity: Option<&Identity>,
    request: &ChatRequest,
) -> Result<ChatResponse> {
    let start = std::time::Instant::now();

    let mut builder = client.client.post(client.url("/chat")).json(request);
    if let Some(identity) = identity {
        builder = builder.bearer_auth(&identity.token);
    }

    let response = builder.send().await?;
    let reply: ChatResponse = decode(response).await?;

    tracing::info!(
        duration_ms = start.elapsed().as_millis(),
        emergency = reply.emergency_flag,
        "AI reply received"
    );
    Ok(reply)
}

pub async fn generate_title(
    client: &ApiClient,
    identity: &Identity,
    conversation_id: &str,
    message: &str,
) -> Result<TitleResponse> {
    let response = client
        .client
        .post(client.url("/title"))
        .bearer_auth(&identity.token)
        .json(&TitleRequest {
            conversation_id: conversation_id.to_string(),
            message: message.to_string(),
        })
        .send()
        .await?;

    decode(response).await
}
