//! Access policy: who may read a student's academic data.
//!
//! A student may read their own data. A tutor may read the data of students
//! they are linked to. Nobody else may, including administrators, whose
//! routes never go through this predicate.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enums::Role;
use crate::errors::CoreError;
use crate::records::AcademicRecords;

/// The authenticated principal making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "role")]
pub enum Caller {
    Student { id: i64 },
    Tutor { id: i64 },
    Admin { id: i64 },
}

impl Caller {
    /// Build a caller from a role and principal id.
    #[must_use]
    pub const fn new(role: Role, id: i64) -> Self {
        match role {
            Role::Student => Self::Student { id },
            Role::Tutor => Self::Tutor { id },
            Role::Admin => Self::Admin { id },
        }
    }

    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Self::Student { .. } => Role::Student,
            Self::Tutor { .. } => Role::Tutor,
            Self::Admin { .. } => Role::Admin,
        }
    }

    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Student { id } | Self::Tutor { id } | Self::Admin { id } => id,
        }
    }
}

/// Outcome of the part of the policy that needs no store lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCheck {
    Granted,
    Denied,
    /// Granted iff a link between this tutor and the target exists.
    RequiresLink { tutor_id: i64 },
}

/// Decide what the policy needs for `caller` reading `target_student_id`.
#[must_use]
pub const fn check(caller: Caller, target_student_id: i64) -> AccessCheck {
    match caller {
        Caller::Student { id } if id == target_student_id => AccessCheck::Granted,
        Caller::Tutor { id } => AccessCheck::RequiresLink { tutor_id: id },
        Caller::Student { .. } | Caller::Admin { .. } => AccessCheck::Denied,
    }
}

/// Whether `caller` may read `target_student_id`'s data.
///
/// Performs one link lookup when the caller is a tutor and none otherwise.
///
/// # Errors
///
/// Returns any store error from the link lookup unchanged.
pub async fn can_access<R: AcademicRecords>(
    records: &R,
    caller: Caller,
    target_student_id: i64,
) -> Result<bool, CoreError> {
    let allowed = match check(caller, target_student_id) {
        AccessCheck::Granted => true,
        AccessCheck::Denied => false,
        AccessCheck::RequiresLink { tutor_id } => {
            records.link_exists(tutor_id, target_student_id).await?
        }
    };
    debug!(
        role = %caller.role(),
        caller_id = caller.id(),
        target_student_id,
        allowed,
        "access decision"
    );
    Ok(allowed)
}
