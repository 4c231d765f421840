//! The read seam between the academic logic and the grade store.
//!
//! `gw-db` implements [`AcademicRecords`] over libSQL; tests implement it over
//! in-memory fixtures. Every method is a plain read with no side effects.

use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{GradeRecord, LinkedStudent, LinkedTutor, Student};
use crate::errors::CoreError;

/// Which grades an operation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "scope", content = "period_id")]
pub enum PeriodScope {
    /// Every recorded period.
    #[default]
    All,
    /// A single period, by id. Ids are validated positive at the boundary.
    Period(i64),
}

impl PeriodScope {
    /// The period id, if scoped to one.
    #[must_use]
    pub const fn period_id(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Period(id) => Some(id),
        }
    }

    /// Parse an optional `period` query value.
    ///
    /// Absent or empty means [`PeriodScope::All`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on field `period` when the value is not
    /// a positive integer.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::All);
        };
        match raw.parse::<i64>() {
            Ok(id) if id >= 1 => Ok(Self::Period(id)),
            _ => Err(CoreError::invalid(
                "period",
                "period must be a positive integer",
            )),
        }
    }
}

impl From<Option<i64>> for PeriodScope {
    fn from(period: Option<i64>) -> Self {
        period.map_or(Self::All, Self::Period)
    }
}

/// Read access to the academic records a summary or risk report needs.
pub trait AcademicRecords: Sync {
    /// Resolve a student by id.
    fn find_student(
        &self,
        student_id: i64,
    ) -> impl Future<Output = Result<Option<Student>, CoreError>> + Send;

    /// Grades for a student within `scope`, ordered by period number then
    /// subject name.
    fn grades_for(
        &self,
        student_id: i64,
        scope: PeriodScope,
    ) -> impl Future<Output = Result<Vec<GradeRecord>, CoreError>> + Send;

    /// Tutors linked to a student, with each link's relation label.
    fn tutors_for(
        &self,
        student_id: i64,
    ) -> impl Future<Output = Result<Vec<LinkedTutor>, CoreError>> + Send;

    /// Students linked to a tutor, with each link's relation label.
    fn students_for_tutor(
        &self,
        tutor_id: i64,
    ) -> impl Future<Output = Result<Vec<LinkedStudent>, CoreError>> + Send;

    /// Whether a tutor-student link exists.
    fn link_exists(
        &self,
        tutor_id: i64,
        student_id: i64,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
