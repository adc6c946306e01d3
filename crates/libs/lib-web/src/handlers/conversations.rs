//! # Conversation Handlers
//!
//! - `POST   /api/conversations` - create, owned by the caller
//! - `GET    /api/conversations` - caller's conversations, newest first (`[]` when anonymous)
//! - `PATCH  /api/conversations/{id}` - rename
//! - `DELETE /api/conversations/{id}` - delete with its messages
//! - `GET    /api/conversations/{id}` - full history, oldest first
//!
//! A conversation owned by someone else answers 404 exactly like a missing one.

use crate::middleware::{Caller, MaybeCaller};
use axum::extract::{Json, Path, State};
use lib_core::model::store::{ConversationRepository, MessageRepository};
use lib_core::{AppError, DbPool, Result};
use shared::dto::{
    ConversationSummary, CreateConversationRequest, RenameConversationRequest, StoredMessage,
    SuccessResponse,
};
use tracing::{debug, info, instrument};

fn required_title(title: Option<&str>) -> Result<&str> {
    title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Title is required".to_string()))
}

#[instrument(skip(pool, req), fields(user_id = caller.user_id))]
pub async fn create_conversation(
    State(pool): State<DbPool>,
    caller: Caller,
    Json(req): Json<CreateConversationRequest>,
) -> Result<Json<ConversationSummary>> {
    let title = required_title(Some(&req.title))?;

    let conversation = ConversationRepository::create(&pool, caller.user_id, title).await?;
    info!(conversation_id = %conversation.id, "[CONVERSATIONS] Created");

    Ok(Json(conversation.into()))
}

#[instrument(skip(pool))]
pub async fn list_conversations(
    State(pool): State<DbPool>,
    MaybeCaller(caller): MaybeCaller,
) -> Result<Json<Vec<ConversationSummary>>> {
    let Some(caller) = caller else {
        debug!("[CONVERSATIONS] Anonymous list request");
        return Ok(Json(Vec::new()));
    };

    let conversations = ConversationRepository::list_for_user(&pool, caller.user_id).await?;
    debug!(count = conversations.len(), "[CONVERSATIONS] Listed");

    Ok(Json(conversations.into_iter().map(Into::into).collect()))
}

#[instrument(skip(pool, req), fields(user_id = caller.user_id))]
pub async fn rename_conversation(
    State(pool): State<DbPool>,
    caller: Caller,
    Path(id): Path<String>,
    Json(req): Json<RenameConversationRequest>,
) -> Result<Json<ConversationSummary>> {
    let title = required_title(req.title.as_deref())?;

    let conversation = ConversationRepository::rename(&pool, &id, caller.user_id, title).await?;
    info!(conversation_id = %id, "[CONVERSATIONS] Renamed");

    Ok(Json(conversation.into()))
}

#[instrument(skip(pool), fields(user_id = caller.user_id))]
pub async fn delete_conversation(
    State(pool): State<DbPool>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    ConversationRepository::delete(&pool, &id, caller.user_id).await?;
    info!(conversation_id = %id, "[CONVERSATIONS] Deleted");

    Ok(Json(SuccessResponse::ok()))
}

#[instrument(skip(pool), fields(user_id = caller.user_id))]
pub async fn get_history(
    State(pool): State<DbPool>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<Vec<StoredMessage>>> {
    let rows = MessageRepository::list_for_conversation(&pool, &id, caller.user_id).await?;

    let messages = rows
        .into_iter()
        .map(StoredMessage::try_from)
        .collect::<Result<Vec<_>>>()?;

    debug!(count = messages.len(), "[CONVERSATIONS] History loaded");
    Ok(Json(messages))
}
