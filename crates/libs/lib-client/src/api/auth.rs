//! # Authentication Endpoints
//!
//! Handles user authentication (login and signup).

use super::client::{decode, ApiClient};
use crate::Result;
use shared::{AuthResponse, LoginRequest, SignupRequest};

/// Login with username/email and password.
#[tracing::instrument(skip(client, password), fields(email_or_username = %email_or_username))]
pub async fn login(
    client: &ApiClient,
    email_or_username: String,
    password: String,
) -> Result<AuthResponse> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest {
        email_or_username,
        password,
    };

    let response = client
        .client
        .post(client.url("/auth/login"))
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Login network error");
            e
        })?;

    let result = decode::<AuthResponse>(response).await;
    if result.is_ok() {
        tracing::info!(duration_ms = start.elapsed().as_millis(), "Login successful");
    }
    result
}

/// Sign up a new user.
pub async fn signup(
    client: &ApiClient,
    username: String,
    email: String,
    password: String,
) -> Result<AuthResponse> {
    let request = SignupRequest {
        username,
        email,
        password,
    };

    let response = client
        .client
        .post(client.url("/auth/signup"))
        .json(&request)
        .send()
        .await?;

    decode(response).await
}
