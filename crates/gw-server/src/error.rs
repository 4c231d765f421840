//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`. `ApiError` renders the
//! failure envelope with the status code for its kind.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gw_auth::AuthError;
use gw_config::ConfigError;
use gw_core::errors::CoreError;
use gw_core::responses::ApiFailure;
use gw_db::error::DatabaseError;
use thiserror::Error;
use tracing::{error, warn};

use crate::bot::BotError;

/// Errors a request handler can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Access denied")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Bot(#[from] BotError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        Self::Core(err.into())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::Validation(_)) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(CoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Core(CoreError::InvalidTransition { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Auth(
                AuthError::NotAuthenticated
                | AuthError::InvalidCredentials
                | AuthError::TokenExpired
                | AuthError::InvalidToken(_),
            ) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Bot(_) => StatusCode::BAD_GATEWAY,
            Self::Core(CoreError::Other(_)) | Self::Auth(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn envelope(&self) -> ApiFailure {
        match self {
            Self::Core(CoreError::Validation(fields)) => {
                ApiFailure::new("Validation failed").with_errors(fields.clone())
            }
            Self::Core(CoreError::NotFound { entity_type, id }) => {
                ApiFailure::new(format!("{entity_type} {id} not found"))
            }
            Self::Core(CoreError::Conflict(message)) => ApiFailure::new(message.clone()),
            Self::Bot(_) => ApiFailure::new("Chatbot relay failed"),
            other if other.status() == StatusCode::INTERNAL_SERVER_ERROR => {
                ApiFailure::new("Internal server error")
            }
            other => ApiFailure::new(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::INTERNAL_SERVER_ERROR => error!(error = %self, "request failed"),
            StatusCode::BAD_GATEWAY => warn!(error = %self, "chatbot relay failed"),
            StatusCode::FORBIDDEN => warn!("access denied"),
            _ => {}
        }
        (status, Json(self.envelope())).into_response()
    }
}

/// Errors raised while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Bot(#[from] BotError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
