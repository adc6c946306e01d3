//! # Application Configuration
//!
//! Gateway configuration loaded from environment variables (after `dotenvy` has
//! read `.env`). All values are validated on startup to fail fast if misconfigured.
//!
//! The config is passed to handlers through axum state; nothing reads it from a
//! global.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite:data/firstaid.db` |
//! | `JWT_SECRET` | required, 32+ chars |
//! | `JWT_EXPIRATION_HOURS` | `24` (1..=720) |
//! | `AI_API_ENDPOINT` | unset: built-in keyword responder |
//! | `AI_TIMEOUT_SECS` | `30` |
//! | `HOSPITAL_RESULT_LIMIT` | `10` (1..=100) |

use crate::error::{AppError, Result};
use lib_utils::{get_env, get_env_or, get_env_parse_or};

/// Path suffix of the AI answer route; the title route lives next to it.
const ASK_SUFFIX: &str = "/ask";
const TITLE_PATH: &str = "/generate-title";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// Full URL of the AI responder's answer route (usually ending in `/ask`).
    pub ai_api_endpoint: Option<String>,

    /// Per-request timeout for AI responder calls.
    pub ai_timeout_secs: u64,

    /// Maximum number of hospitals returned by one search.
    pub hospital_result_limit: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/firstaid.db");

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| AppError::Config(e.to_string()))?;

        let jwt_expiration_hours = get_env_parse_or("JWT_EXPIRATION_HOURS", 24)
            .map_err(|e| AppError::Config(e.to_string()))?;

        let ai_api_endpoint = get_env("AI_API_ENDPOINT")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let ai_timeout_secs = get_env_parse_or("AI_TIMEOUT_SECS", 30)
            .map_err(|e| AppError::Config(e.to_string()))?;

        let hospital_result_limit = get_env_parse_or("HOSPITAL_RESULT_LIMIT", 10)
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            ai_api_endpoint,
            ai_timeout_secs,
            hospital_result_limit,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err(AppError::Config(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        if self.ai_timeout_secs == 0 {
            return Err(AppError::Config("AI_TIMEOUT_SECS must be positive".to_string()));
        }

        if !(1..=100).contains(&self.hospital_result_limit) {
            return Err(AppError::Config(
                "HOSPITAL_RESULT_LIMIT must be between 1 and 100".to_string(),
            ));
        }

        if let Some(url) = &self.ai_api_endpoint {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "AI_API_ENDPOINT must be an http(s) URL, got {}",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Title generation route derived from the answer route.
    ///
    /// `https://ai.example/ask` becomes `https://ai.example/generate-title`.
    pub fn ai_title_endpoint(&self) -> Option<String> {
        self.ai_api_endpoint.as_ref().map(|url| {
            let trimmed = url.trim_end_matches('/');
            let base = trimmed.strip_suffix(ASK_SUFFIX).unwrap_or(trimmed);
            format!("{}{}", base, TITLE_PATH)
        })
    }
}
