//! # Signup Tests
//!
//! Tests for user signup functionality.

use super::*;

fn signup_request(username: &str, email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_signup_success() {
    // Arrange
    let pool = setup_test_db().await;
    let config = test_config();
    let app = test_app(pool, config.clone());

    // Act
    let (status, body) = post_json(
        app,
        "/signup",
        &signup_request("testuser", "test@example.com", "TestPassword123!"),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);

    let auth_response: AuthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(auth_response.user.username, "testuser");
    assert_eq!(auth_response.user.email, "test@example.com");
    assert_eq!(auth_response.message, "Signup successful");

    let claims = lib_auth::decode_jwt(&auth_response.token, &config.jwt_secret).unwrap();
    assert_eq!(claims.sub, auth_response.user.id);
}

#[tokio::test]
async fn test_signup_username_too_short() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let (status, body) = post_json(
        app,
        "/signup",
        &signup_request("ab", "test@example.com", "TestPassword123!"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error_response.error, "Username must be at least 3 characters");
    assert_eq!(error_response.code.as_deref(), Some("InvalidInput"));
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let (status, body) = post_json(
        app,
        "/signup",
        &signup_request("testuser", "invalid-email", "TestPassword123!"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error_response.error, "Invalid email format");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    // Arrange
    let pool = setup_test_db().await;
    create_user(&pool, "user1", "test@example.com", "Password123!").await;
    let app = test_app(pool, test_config());

    // Act
    let (status, body) = post_json(
        app,
        "/signup",
        &signup_request("user2", "test@example.com", "TestPassword123!"),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error_response.error, "Email already registered");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let pool = setup_test_db().await;
    create_user(&pool, "testuser", "first@example.com", "Password123!").await;
    let app = test_app(pool, test_config());

    let (status, body) = post_json(
        app,
        "/signup",
        &signup_request("testuser", "second@example.com", "TestPassword123!"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error_response.error, "Username already taken");
}

#[tokio::test]
async fn test_signup_password_too_short() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let (status, body) = post_json(
        app,
        "/signup",
        &signup_request("testuser", "test@example.com", "short"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error_response.error, "Password must be at least 8 characters long");
}
