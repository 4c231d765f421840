use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::risk::{MAX_GRADE, MIN_GRADE, is_failing};
use crate::validation::Validator;

/// A recorded grade for one (student, subject, period) triple.
///
/// Grades are append-only. A correction is recorded as a new row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub period_id: i64,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Grade {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        is_failing(self.value)
    }
}

/// A grade joined with its subject and period, as listed to students.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GradeRecord {
    pub id: i64,
    pub subject_name: String,
    pub subject_code: String,
    pub value: f64,
    pub period_name: String,
    pub period_number: u32,
    pub recorded_at: DateTime<Utc>,
}

impl GradeRecord {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        is_failing(self.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub period_id: i64,
    pub value: f64,
}

impl NewGrade {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the value is not a finite number
    /// on the 0-10 scale.
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .check(
                self.value.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&self.value),
                "value",
                "value must be between 0 and 10",
            )
            .finish()
    }
}
