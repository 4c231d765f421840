use chrono::{DateTime, TimeDelta, Utc};
use gw_core::access::Caller;
use gw_core::enums::Role;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims carried in a gradewatch session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal id, as a string per JWT convention.
    pub sub: String,
    pub role: Role,
    /// Present for student sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    #[must_use]
    pub fn new(caller: Caller, national_id: Option<String>, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            sub: caller.id().to_string(),
            role: caller.role(),
            national_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// The caller these claims authenticate.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when `sub` is not a numeric id.
    pub fn to_caller(&self) -> Result<Caller, AuthError> {
        let id = self
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken(format!("non-numeric subject '{}'", self.sub)))?;
        Ok(Caller::new(self.role, id))
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
