use super::*;

#[tokio::test]
async fn test_title_renames_owned_conversation() {
    let app = TestApp::new().await;
    let token = app.token_for("alice").await;
    let id = app.conversation(&token, "I have a really bad...").await;

    let (status, body) = app
        .call(
            "POST",
            "/api/title",
            Some(&token),
            Some(json!({ "conversationId": id, "message": "I have a really bad headache" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "title": "Stub Title" }));

    let (_, list) = app.call("GET", "/api/conversations", Some(&token), None).await;
    assert_eq!(list[0]["title"], "Stub Title");
}

#[tokio::test]
async fn test_title_checks_ownership_before_ai() {
    let app = TestApp::new().await;
    let alice = app.token_for("alice").await;
    let bob = app.token_for("bob").await;
    let id = app.conversation(&alice, "Mine").await;

    let (status, _) = app
        .call(
            "POST",
            "/api/title",
            Some(&bob),
            Some(json!({ "conversationId": id, "message": "hello" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.ai.title_calls.load(Ordering::SeqCst), 0);

    let (status, _) = app
        .call(
            "POST",
            "/api/title",
            None,
            Some(json!({ "conversationId": id, "message": "hello" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
