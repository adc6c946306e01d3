//! # Title Handler
//!
//! `POST /api/title` asks the AI responder for a title for a conversation's first
//! message and stores it. Ownership is checked before the AI is contacted.

use crate::middleware::Caller;
use crate::services::AiResponder;
use axum::extract::{Json, State};
use lib_core::model::store::ConversationRepository;
use lib_core::{AppError, DbPool, Result};
use lib_utils::validate_not_empty;
use shared::dto::{TitleRequest, TitleResponse};
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument(skip(pool, ai, req), fields(user_id = caller.user_id, conversation_id = %req.conversation_id))]
pub async fn generate_title(
    State(pool): State<DbPool>,
    State(ai): State<Arc<dyn AiResponder>>,
    caller: Caller,
    Json(req): Json<TitleRequest>,
) -> Result<Json<TitleResponse>> {
    validate_not_empty(&req.message, "Message").map_err(AppError::InvalidInput)?;

    ConversationRepository::find_owned(&pool, &req.conversation_id, caller.user_id)
        .await?
        .ok_or_else(AppError::conversation_not_found)?;

    let title = ai.title(req.message.trim()).await?;

    let conversation =
        ConversationRepository::rename(&pool, &req.conversation_id, caller.user_id, &title).await?;
    info!(title = %conversation.title, "[TITLE] Conversation titled");

    Ok(Json(TitleResponse {
        success: true,
        title: conversation.title,
    }))
}
