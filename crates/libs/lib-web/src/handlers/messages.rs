//! # Message Handler
//!
//! `POST /api/messages` appends one message to an owned conversation.
//!
//! Emergency sentinel rows are assistant rows whose content is always
//! [`EMERGENCY_SENTINEL_CONTENT`], whatever the client sent.

use crate::middleware::Caller;
use axum::extract::{Json, State};
use lib_core::model::store::models::MessageForCreate;
use lib_core::model::store::MessageRepository;
use lib_core::{AppError, DbPool, Result};
use lib_utils::validate_not_empty;
use shared::dto::{CreateMessageRequest, Role, SuccessResponse, EMERGENCY_SENTINEL_CONTENT};
use tracing::{debug, instrument};

fn normalize(req: CreateMessageRequest) -> Result<MessageForCreate> {
    validate_not_empty(&req.conversation_id, "Conversation id").map_err(AppError::InvalidInput)?;

    let is_emergency_prompt = req.is_emergency_prompt.unwrap_or(false);

    let content = if is_emergency_prompt {
        if req.role != Role::Assistant {
            return Err(AppError::InvalidInput(
                "Only assistant messages can be emergency prompts".to_string(),
            ));
        }
        EMERGENCY_SENTINEL_CONTENT.to_string()
    } else {
        validate_not_empty(&req.content, "Content").map_err(AppError::InvalidInput)?;
        req.content
    };

    Ok(MessageForCreate {
        conversation_id: req.conversation_id,
        role: req.role,
        content,
        is_emergency_prompt,
    })
}

#[instrument(skip(pool, req), fields(user_id = caller.user_id, conversation_id = %req.conversation_id))]
pub async fn create_message(
    State(pool): State<DbPool>,
    caller: Caller,
    Json(req): Json<CreateMessageRequest>,
) -> Result<Json<SuccessResponse>> {
    let message = normalize(req)?;
    let role = message.role;

    let id = MessageRepository::append(&pool, caller.user_id, message).await?;
    debug!(message_id = id, %role, "[MESSAGES] Stored");

    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Role, content: &str, emergency: Option<bool>) -> CreateMessageRequest {
        CreateMessageRequest {
            conversation_id: "c1".to_string(),
            content: content.to_string(),
            role,
            is_emergency_prompt: emergency,
        }
    }

    #[test]
    fn test_sentinel_content_forced() {
        let msg = normalize(request(Role::Assistant, "<button>", Some(true))).unwrap();
        assert_eq!(msg.content, EMERGENCY_SENTINEL_CONTENT);
        assert!(msg.is_emergency_prompt);
    }

    #[test]
    fn test_user_emergency_rejected() {
        let err = normalize(request(Role::User, "x", Some(true))).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = normalize(request(Role::User, "   ", None)).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
