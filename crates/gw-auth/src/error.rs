use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    NotAuthenticated,

    #[error("invalid national ID or password")]
    InvalidCredentials,

    #[error("session token expired, log in again")]
    TokenExpired,

    #[error("invalid session token: {0}")]
    InvalidToken(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token secret is not configured")]
    NotConfigured,

    #[error("{0}")]
    Other(String),
}
