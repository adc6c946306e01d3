//! # Caller Identity
//!
//! Extractors that resolve the caller from `Authorization: Bearer <jwt>`.
//!
//! - [`Caller`] rejects the request with 401 when no valid identity is present.
//!   Use it on every owner-scoped write and on history reads.
//! - [`MaybeCaller`] never rejects; an absent or invalid token yields `None`.
//!   Use it only where anonymous access is tolerated (the conversation list).
//!
//! The resolved id is the only owner the handlers ever use; request bodies carry
//! no owner field.
//!
//! ```rust,ignore
//! async fn handler(caller: Caller) -> String {
//!     format!("Hello, user {}!", caller.user_id)
//! }
//! ```

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use lib_auth::resolve_user_id;
use lib_core::{AppError, Config};
use tracing::{debug, warn};

/// Authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
}

/// Caller if one could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeCaller(pub Option<Caller>);

fn resolve(parts: &Parts, config: &Config) -> Result<Caller, lib_auth::Error> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user_id = resolve_user_id(header, &config.jwt_secret)?;
    Ok(Caller { user_id })
}

impl<S> FromRequestParts<S> for Caller
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);

        match resolve(parts, &config) {
            Ok(caller) => {
                debug!("[AUTH] Authenticated user id: {}", caller.user_id);
                Ok(caller)
            }
            Err(e) => {
                warn!("[AUTH] Rejected {} {}: {}", parts.method, parts.uri.path(), e);
                Err(AppError::Unauthorized("Unauthorized".to_string()))
            }
        }
    }
}

impl<S> FromRequestParts<S> for MaybeCaller
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);

        match resolve(parts, &config) {
            Ok(caller) => Ok(MaybeCaller(Some(caller))),
            Err(lib_auth::Error::MissingCredentials) => Ok(MaybeCaller(None)),
            Err(e) => {
                debug!("[AUTH] Treating caller as anonymous: {}", e);
                Ok(MaybeCaller(None))
            }
        }
    }
}
