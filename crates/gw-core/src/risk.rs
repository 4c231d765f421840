//! Academic-risk evaluation and grade aggregation.
//!
//! Everything here is a pure function of a grade snapshot and an explicit
//! [`RiskThresholds`] value. Thresholds are passed in by the caller and never
//! read from process-wide state.
//!
//! Precision: averages are displayed rounded to two decimals, but the
//! comparison against `minimum_average` uses the full-precision mean.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::GradeRecord;

/// Lowest value on the grading scale.
pub const MIN_GRADE: f64 = 0.0;
/// Highest value on the grading scale.
pub const MAX_GRADE: f64 = 10.0;
/// A grade strictly below this value is a failed subject.
pub const PASSING_GRADE: f64 = 6.0;

/// Whether a single grade value counts as failed.
#[must_use]
pub fn is_failing(value: f64) -> bool {
    value < PASSING_GRADE
}

/// Round to two decimals for display.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Limits a student must stay within to avoid being flagged at risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RiskThresholds {
    /// Averages strictly below this are flagged.
    pub minimum_average: f64,
    /// Failed counts strictly above this are flagged.
    pub max_failed_subjects: u32,
}

impl RiskThresholds {
    pub const DEFAULT_MINIMUM_AVERAGE: f64 = 6.0;
    pub const DEFAULT_MAX_FAILED_SUBJECTS: u32 = 2;
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            minimum_average: Self::DEFAULT_MINIMUM_AVERAGE,
            max_failed_subjects: Self::DEFAULT_MAX_FAILED_SUBJECTS,
        }
    }
}

// ---------------------------------------------------------------------------
// GradeStats
// ---------------------------------------------------------------------------

/// Aggregate of a grade snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeStats {
    /// Number of grades in scope.
    pub total: u32,
    /// Number of grades strictly below [`PASSING_GRADE`].
    pub failed_count: u32,
    /// Full-precision mean, `None` when there are no grades.
    pub mean: Option<f64>,
}

impl GradeStats {
    /// Aggregate raw grade values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut total = 0u32;
        let mut failed_count = 0u32;
        let mut sum = 0.0;
        for value in values {
            total += 1;
            sum += value;
            if is_failing(value) {
                failed_count += 1;
            }
        }
        let mean = (total > 0).then(|| sum / f64::from(total));
        Self {
            total,
            failed_count,
            mean,
        }
    }

    /// Aggregate joined grade records.
    #[must_use]
    pub fn from_records(records: &[GradeRecord]) -> Self {
        Self::from_values(records.iter().map(|r| r.value))
    }

    /// Mean rounded to two decimals, for display.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        self.mean.map(round2)
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Why a student was flagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskReason {
    AverageBelowMinimum { average: f64 },
    TooManyFailed { failed: u32, max_allowed: u32 },
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AverageBelowMinimum { average } => {
                write!(f, "average below minimum: {:.2}", round2(*average))
            }
            Self::TooManyFailed {
                failed,
                max_allowed,
            } => write!(f, "{failed} subjects failed (max allowed: {max_allowed})"),
        }
    }
}

/// Outcome of a risk evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskVerdict {
    pub is_at_risk: bool,
    pub reasons: Vec<String>,
}

impl RiskVerdict {
    fn from_reasons(reasons: &[RiskReason]) -> Self {
        Self {
            is_at_risk: !reasons.is_empty(),
            reasons: reasons.iter().map(ToString::to_string).collect(),
        }
    }
}

/// List the reasons a snapshot breaches `thresholds`.
///
/// Both rules are evaluated independently. A snapshot with no grades has no
/// average and is never flagged for it.
#[must_use]
pub fn risk_reasons(stats: &GradeStats, thresholds: &RiskThresholds) -> Vec<RiskReason> {
    let mut reasons = Vec::with_capacity(2);
    match stats.mean {
        Some(mean) if mean < thresholds.minimum_average => {
            reasons.push(RiskReason::AverageBelowMinimum { average: mean });
        }
        Some(_) | None => {}
    }
    if stats.failed_count > thresholds.max_failed_subjects {
        reasons.push(RiskReason::TooManyFailed {
            failed: stats.failed_count,
            max_allowed: thresholds.max_failed_subjects,
        });
    }
    reasons
}

/// Evaluate an already-aggregated snapshot.
#[must_use]
pub fn evaluate(stats: &GradeStats, thresholds: &RiskThresholds) -> RiskVerdict {
    RiskVerdict::from_reasons(&risk_reasons(stats, thresholds))
}

/// Evaluate a student's grade values for one scope.
#[must_use]
pub fn evaluate_risk(values: &[f64], thresholds: &RiskThresholds) -> RiskVerdict {
    evaluate(&GradeStats::from_values(values.iter().copied()), thresholds)
}
