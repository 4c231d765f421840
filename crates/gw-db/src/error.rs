//! Database error types for gw-db.

use gw_core::enums::AppointmentStatus;
use gw_core::errors::CoreError;
use thiserror::Error;
use tracing::error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Lookup of a specific entity found nothing.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: &'static str, id: i64 },

    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Appointment status change not allowed by the status machine.
    #[error("Cannot transition appointment {id} from {from} to {to}")]
    InvalidTransition {
        id: i64,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Turn a UNIQUE violation from a write into `Conflict`, keeping every
    /// other libSQL error as is.
    pub(crate) fn on_unique(err: libsql::Error, message: impl Into<String>) -> Self {
        let text = err.to_string();
        if text.contains("UNIQUE constraint failed") {
            Self::Conflict(message.into())
        } else {
            Self::LibSql(err)
        }
    }
}

impl From<DatabaseError> for CoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, id } => Self::not_found(entity_type, id),
            DatabaseError::Conflict(message) => Self::Conflict(message),
            DatabaseError::InvalidTransition { id, from, to } => Self::InvalidTransition {
                entity_type: "appointment".into(),
                id: id.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            },
            other => {
                error!(error = %other, "grade store failure");
                Self::Other(anyhow::Error::new(other))
            }
        }
    }
}
