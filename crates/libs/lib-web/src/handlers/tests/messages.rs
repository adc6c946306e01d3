use super::*;
use shared::dto::EMERGENCY_SENTINEL_CONTENT;

async fn post_message(app: &TestApp, token: Option<&str>, body: Value) -> StatusCode {
    app.call("POST", "/api/messages", token, Some(body)).await.0
}

#[tokio::test]
async fn test_history_round_trip_with_sentinel() {
    let app = TestApp::new().await;
    let token = app.token_for("alice").await;
    let id = app.conversation(&token, "Chest pain").await;

    for body in [
        json!({ "conversationId": id, "content": "I have chest pain", "role": "user" }),
        json!({ "conversationId": id, "content": "Call emergency services.", "role": "assistant" }),
        json!({
            "conversationId": id,
            "content": "<rendered button markup>",
            "role": "assistant",
            "isEmergencyPrompt": true
        }),
    ] {
        assert_eq!(post_message(&app, Some(&token), body).await, StatusCode::OK);
    }

    let (status, body) = app
        .call("GET", &format!("/api/conversations/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "role": "user", "content": "I have chest pain", "isEmergencyPrompt": false },
            { "role": "assistant", "content": "Call emergency services.", "isEmergencyPrompt": false },
            { "role": "assistant", "content": EMERGENCY_SENTINEL_CONTENT, "isEmergencyPrompt": true },
        ])
    );
}

#[tokio::test]
async fn test_snake_case_body_accepted() {
    let app = TestApp::new().await;
    let token = app.token_for("alice").await;
    let id = app.conversation(&token, "x").await;

    let status = post_message(
        &app,
        Some(&token),
        json!({ "conversation_id": id, "content": "hi", "role": "user", "is_emergency_prompt": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_message_rules() {
    let app = TestApp::new().await;
    let alice = app.token_for("alice").await;
    let bob = app.token_for("bob").await;
    let id = app.conversation(&alice, "x").await;

    let body = json!({ "conversationId": id, "content": "hi", "role": "user" });
    assert_eq!(post_message(&app, None, body.clone()).await, StatusCode::UNAUTHORIZED);
    assert_eq!(post_message(&app, Some(&bob), body).await, StatusCode::NOT_FOUND);

    let empty = json!({ "conversationId": id, "content": " ", "role": "user" });
    assert_eq!(post_message(&app, Some(&alice), empty).await, StatusCode::BAD_REQUEST);

    let user_sentinel = json!({
        "conversationId": id,
        "content": "x",
        "role": "user",
        "isEmergencyPrompt": true
    });
    assert_eq!(
        post_message(&app, Some(&alice), user_sentinel).await,
        StatusCode::BAD_REQUEST
    );

    let bad_role = json!({ "conversationId": id, "content": "hi", "role": "system" });
    assert_eq!(
        post_message(&app, Some(&alice), bad_role).await,
        StatusCode::UNPROCESSABLE_ENTITY
    );
}
