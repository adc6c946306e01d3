//! # Chat Handler
//!
//! `POST /api/chat` relays one turn to the AI responder. Anonymous callers are
//! served too; nothing is persisted here.

use crate::middleware::MaybeCaller;
use crate::services::AiResponder;
use axum::extract::{Json, State};
use lib_core::{AppError, Result};
use shared::dto::{ChatRequest, ChatResponse};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[instrument(skip_all, fields(history_len = req.history.len()))]
pub async fn chat(
    State(ai): State<Arc<dyn AiResponder>>,
    MaybeCaller(caller): MaybeCaller,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidInput("Message cannot be empty".to_string()));
    }

    let reply = ai.answer(message, &req.history).await?;
    if reply.answer.trim().is_empty() {
        warn!(emergency = reply.emergency_flag, "[CHAT] AI returned an empty answer");
        return Err(AppError::Upstream("AI service returned no answer".to_string()));
    }

    info!(
        user_id = caller.map(|c| c.user_id),
        emergency = reply.emergency_flag,
        "[CHAT] Answer relayed"
    );

    Ok(Json(reply))
}
