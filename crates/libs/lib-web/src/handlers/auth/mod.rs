//! # Authentication Handlers
//!
//! HTTP request handlers for user authentication endpoints.
//!
//! ## Overview
//!
//! - User signup with username, email and password
//! - User login with email or username
//! - JWT token generation
//!
//! The returned token is the caller's session. Every owner-scoped route resolves
//! the user from `Authorization: Bearer <token>`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{signup, login};
//!
//! let app = Router::new()
//!     .route("/signup", post(signup))
//!     .route("/login", post(login));
//! ```

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use lib_auth::{encode_jwt, hash_password, verify_password};
use lib_core::model::store::models::{User, UserForCreate};
use lib_core::model::store::UserRepository;
use lib_core::{AppError, Config, DbPool, Result};
use lib_utils::{format_time, validate_email, validate_min_length};
use shared::dto::{AuthResponse, LoginRequest, SignupRequest, UserInfo};
use tracing::{debug, error, info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        created_at: format_time(user.created_at),
    }
}

fn issue_token(user: &User, config: &Config) -> Result<String> {
    encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .map_err(|e| {
        error!("[AUTH] JWT encoding failed: {}", e);
        AppError::Internal(format!("Failed to generate token: {}", e))
    })
}

/// Signup handler - creates a new user account.
///
/// # Returns
///
/// * `201 Created` with the user and a JWT token
/// * `400` on validation failure, `409` when the email or username is taken
///
/// # Validation
///
/// - Username must be at least 3 characters
/// - Email must be well-formed
/// - Email and username must be unique
/// - Password must be at least 8 characters (checked by `hash_password`)
#[instrument(skip(pool, config, req), fields(username = %req.username))]
pub async fn signup(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    info!("[SIGNUP] New user signup request");

    let username = req.username.trim();
    let email = req.email.trim();

    validate_min_length(username, 3, "Username").map_err(AppError::InvalidInput)?;
    validate_email(email).map_err(AppError::InvalidInput)?;

    if UserRepository::find_by_email(&pool, email).await?.is_some() {
        warn!("[SIGNUP] Email already registered");
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    if UserRepository::find_by_username(&pool, username).await?.is_some() {
        warn!("[SIGNUP] Username already taken: {}", username);
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    debug!("[SIGNUP] Hashing password...");
    let password_hash = hash_password(&req.password).map_err(|e| match e {
        lib_auth::Error::PasswordTooShort(_) => AppError::InvalidInput(e.to_string()),
        other => AppError::Internal(other.to_string()),
    })?;

    let user = UserRepository::create(
        &pool,
        UserForCreate::new(username.to_string(), email.to_string(), password_hash),
    )
    .await?;

    let token = issue_token(&user, &config)?;

    info!(user_id = user.id, "[SIGNUP] User created and authenticated");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user_info(&user),
            token,
            message: "Signup successful".to_string(),
        }),
    ))
}

/// Login handler - authenticates an existing user.
///
/// Accepts either an email (contains `@`) or a username. Unknown users, wrong
/// passwords and deactivated accounts all answer `401` with the same message.
#[instrument(skip(pool, config, req))]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let identifier = req.email_or_username.trim();
    debug!("[LOGIN] Login attempt for {}", identifier);

    let user = UserRepository::find_by_login(&pool, identifier)
        .await?
        .ok_or_else(|| {
            warn!("[LOGIN] User not found: {}", identifier);
            AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
        })?;

    if !user.is_active {
        warn!("[LOGIN] Account deactivated: {}", user.username);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let is_valid = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

    if !is_valid {
        warn!("[LOGIN] Invalid password for user: {}", user.username);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    if let Err(e) = UserRepository::update_last_login(&pool, user.id).await {
        warn!("[LOGIN] Failed to update last login: {}", e);
    }

    let token = issue_token(&user, &config)?;

    info!(user_id = user.id, "[LOGIN] User authenticated");

    Ok(Json(AuthResponse {
        user: user_info(&user),
        token,
        message: "Login successful".to_string(),
    }))
}

#[cfg(test)]
mod tests;
