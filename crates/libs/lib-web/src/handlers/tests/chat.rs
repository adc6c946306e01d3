use super::*;

#[tokio::test]
async fn test_chat_relays_answer_and_flag() {
    let app = TestApp::with_responder(StubResponder::new("Call an ambulance.", true)).await;

    let (status, body) = app
        .call(
            "POST",
            "/api/chat",
            None,
            Some(json!({
                "message": "I have chest pain",
                "history": [
                    { "role": "user", "content": "hello" },
                    { "role": "assistant", "content": "User interface element" }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": "Call an ambulance.", "emergencyFlag": true }));

    assert_eq!(app.ai.answer_calls.load(Ordering::SeqCst), 1);
    let history = app.ai.last_history.lock().unwrap().clone();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].content, "User interface element");
}

#[tokio::test]
async fn test_chat_history_optional() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call("POST", "/api/chat", None, Some(json!({ "message": "Hi" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emergencyFlag"], false);
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let app = TestApp::new().await;

    let (status, _) = app
        .call("POST", "/api/chat", None, Some(json!({ "message": "   " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.ai.answer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_upstream_failure_is_bad_gateway() {
    let app = TestApp::with_responder(StubResponder::failing()).await;

    let (status, body) = app
        .call("POST", "/api/chat", None, Some(json!({ "message": "Hi" })))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "Upstream");
}

#[tokio::test]
async fn test_chat_empty_answer_is_bad_gateway() {
    let app = TestApp::with_responder(StubResponder::new("", true)).await;

    let (status, body) = app
        .call("POST", "/api/chat", None, Some(json!({ "message": "I have chest pain" })))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "Upstream");
    assert_eq!(app.ai.answer_calls.load(Ordering::SeqCst), 1);
}
