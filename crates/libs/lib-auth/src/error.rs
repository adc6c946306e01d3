//! # Auth Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to parse hash: {0}")]
    HashParse(String),

    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    #[error("Failed to decode JWT: {0}")]
    TokenDecode(String),

    #[error("Missing Authorization header")]
    MissingCredentials,

    #[error("Invalid Authorization header format")]
    MalformedCredentials,

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),
}
