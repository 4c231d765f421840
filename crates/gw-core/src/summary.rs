//! Academic summary builder.
//!
//! Composes the reads from an [`AcademicRecords`] store with the risk
//! evaluator. Independent reads are issued concurrently; the average, failed
//! count, and verdict are always derived from the grade list fetched in the
//! same call, so the parts of one response never disagree.

use futures::future::try_join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{GradeRecord, LinkedStudent, LinkedTutor, Student, StudentBrief};
use crate::errors::CoreError;
use crate::records::{AcademicRecords, PeriodScope};
use crate::risk::{GradeStats, RiskThresholds, RiskVerdict, evaluate};

/// Everything the dashboard shows for one student and scope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AcademicSummary {
    pub student: Student,
    pub period: Option<i64>,
    pub grades: Vec<GradeRecord>,
    /// Mean rounded to two decimals; `null` when no grades are recorded.
    pub average: Option<f64>,
    pub failed_count: u32,
    pub tutors: Vec<LinkedTutor>,
    pub risk: RiskVerdict,
}

/// Grade listing with its aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GradeReport {
    pub period: Option<i64>,
    pub grades: Vec<GradeRecord>,
    pub average: Option<f64>,
    pub failed_count: u32,
}

/// Risk verdict with the thresholds it was judged against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RiskReport {
    pub student: StudentBrief,
    pub period: Option<i64>,
    pub average: Option<f64>,
    pub failed_count: u32,
    pub risk: RiskVerdict,
    pub criteria: RiskThresholds,
}

/// A tutor's student who is currently at risk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AtRiskStudent {
    pub student: LinkedStudent,
    pub average: Option<f64>,
    pub failed_count: u32,
    pub risk: RiskVerdict,
}

fn require_student(found: Option<Student>, student_id: i64) -> Result<Student, CoreError> {
    found.ok_or_else(|| CoreError::not_found("student", student_id))
}

/// Build the full academic summary for a student.
///
/// # Errors
///
/// Returns `CoreError::NotFound` when the student does not exist, or any
/// store error unchanged.
pub async fn build_summary<R: AcademicRecords>(
    records: &R,
    thresholds: &RiskThresholds,
    student_id: i64,
    scope: PeriodScope,
) -> Result<AcademicSummary, CoreError> {
    let (student, grades, tutors) = futures::try_join!(
        records.find_student(student_id),
        records.grades_for(student_id, scope),
        records.tutors_for(student_id),
    )?;
    let student = require_student(student, student_id)?;

    let stats = GradeStats::from_records(&grades);
    let risk = evaluate(&stats, thresholds);
    debug!(
        student_id,
        grades = stats.total,
        failed = stats.failed_count,
        at_risk = risk.is_at_risk,
        "built academic summary"
    );

    Ok(AcademicSummary {
        student,
        period: scope.period_id(),
        grades,
        average: stats.average(),
        failed_count: stats.failed_count,
        tutors,
        risk,
    })
}

/// List a student's grades with average and failed count.
///
/// # Errors
///
/// Returns `CoreError::NotFound` when the student does not exist.
pub async fn build_grade_report<R: AcademicRecords>(
    records: &R,
    student_id: i64,
    scope: PeriodScope,
) -> Result<GradeReport, CoreError> {
    let (student, grades) = futures::try_join!(
        records.find_student(student_id),
        records.grades_for(student_id, scope),
    )?;
    require_student(student, student_id)?;

    let stats = GradeStats::from_records(&grades);
    Ok(GradeReport {
        period: scope.period_id(),
        grades,
        average: stats.average(),
        failed_count: stats.failed_count,
    })
}

/// Evaluate a student's risk and report it with the criteria used.
///
/// # Errors
///
/// Returns `CoreError::NotFound` when the student does not exist.
pub async fn build_risk_report<R: AcademicRecords>(
    records: &R,
    thresholds: &RiskThresholds,
    student_id: i64,
    scope: PeriodScope,
) -> Result<RiskReport, CoreError> {
    let (student, grades) = futures::try_join!(
        records.find_student(student_id),
        records.grades_for(student_id, scope),
    )?;
    let student = require_student(student, student_id)?;

    let stats = GradeStats::from_records(&grades);
    Ok(RiskReport {
        student: student.brief(),
        period: scope.period_id(),
        average: stats.average(),
        failed_count: stats.failed_count,
        risk: evaluate(&stats, thresholds),
        criteria: *thresholds,
    })
}

/// Students linked to `tutor_id` that are at risk across all periods.
///
/// Students with no recorded grades are left out. Results are ordered by
/// failed count (most first), then by average (lowest first).
///
/// # Errors
///
/// Returns any store error unchanged.
pub async fn students_at_risk_for_tutor<R: AcademicRecords>(
    records: &R,
    thresholds: &RiskThresholds,
    tutor_id: i64,
) -> Result<Vec<AtRiskStudent>, CoreError> {
    let students = records.students_for_tutor(tutor_id).await?;
    let grade_sets = try_join_all(
        students
            .iter()
            .map(|s| records.grades_for(s.id, PeriodScope::All)),
    )
    .await?;

    let mut flagged: Vec<(GradeStats, AtRiskStudent)> = students
        .into_iter()
        .zip(grade_sets)
        .filter_map(|(student, grades)| {
            let stats = GradeStats::from_records(&grades);
            if stats.total == 0 {
                return None;
            }
            let risk = evaluate(&stats, thresholds);
            risk.is_at_risk.then(|| {
                (
                    stats,
                    AtRiskStudent {
                        student,
                        average: stats.average(),
                        failed_count: stats.failed_count,
                        risk,
                    },
                )
            })
        })
        .collect();

    flagged.sort_by(|(a, _), (b, _)| {
        b.failed_count.cmp(&a.failed_count).then_with(|| {
            a.mean
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.mean.unwrap_or(f64::INFINITY))
        })
    });
    debug!(tutor_id, flagged = flagged.len(), "evaluated tutor students");
    Ok(flagged.into_iter().map(|(_, s)| s).collect())
}
