//! # JWT Session Tokens
//!
//! Token issuing and caller identity resolution.
//!
//! The gateway never trusts an owner id from a request body. The only source of
//! identity is the `Authorization: Bearer <jwt>` header, resolved through
//! [`resolve_user_id`].

use crate::error::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| Error::InvalidSubject(self.sub.clone()))
    }
}

/// Encode a JWT token with user claims.
pub fn encode_jwt(
    user_id: i64,
    username: String,
    secret: &str,
    expiration_hours: i64,
) -> Result<String> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        username,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::TokenEncode(e.to_string()))
}

/// Decode and validate a JWT token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| Error::TokenDecode(e.to_string()))
}

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str> {
    let header = header.ok_or(Error::MissingCredentials)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(Error::MalformedCredentials)?
        .trim();

    if token.is_empty() {
        return Err(Error::MalformedCredentials);
    }
    Ok(token)
}

/// Resolve the caller's user id from an `Authorization` header value.
pub fn resolve_user_id(header: Option<&str>, secret: &str) -> Result<i64> {
    let token = bearer_token(header)?;
    decode_jwt(token, secret)?.user_id()
}
