//! Grade records and the per-student grade query.
//!
//! Grades are append-only. A correction is recorded as a new row and both
//! rows stay in the student's grade list.

use chrono::Utc;
use tracing::debug;

use gw_core::entities::{Grade, GradeRecord, NewGrade};
use gw_core::records::PeriodScope;

use crate::SchoolDb;
use crate::error::DatabaseError;
use crate::helpers::{get_narrow, parse_datetime};

fn row_to_grade(row: &libsql::Row) -> Result<Grade, DatabaseError> {
    Ok(Grade {
        id: row.get(0)?,
        student_id: row.get(1)?,
        subject_id: row.get(2)?,
        period_id: row.get(3)?,
        value: row.get(4)?,
        recorded_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_record(row: &libsql::Row) -> Result<GradeRecord, DatabaseError> {
    Ok(GradeRecord {
        id: row.get(0)?,
        subject_name: row.get(1)?,
        subject_code: row.get(2)?,
        value: row.get(3)?,
        period_name: row.get(4)?,
        period_number: get_narrow(row, 5)?,
        recorded_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl SchoolDb {
    /// Append a grade for one student, subject and period.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when the student, subject or period
    /// does not exist.
    pub async fn record_grade(&self, input: &NewGrade) -> Result<Grade, DatabaseError> {
        self.ensure_exists("students", "student", input.student_id)
            .await?;
        self.ensure_exists("subjects", "subject", input.subject_id)
            .await?;
        self.ensure_exists("periods", "period", input.period_id)
            .await?;

        let now = Utc::now();
        let mut rows = self
            .conn()
            .query(
                "INSERT INTO grades (student_id, subject_id, period_id, value, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, student_id, subject_id, period_id, value, recorded_at",
                libsql::params![
                    input.student_id,
                    input.subject_id,
                    input.period_id,
                    input.value,
                    now.to_rfc3339()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let grade = row_to_grade(&row)?;
        debug!(
            student_id = grade.student_id,
            subject_id = grade.subject_id,
            period_id = grade.period_id,
            "grade recorded"
        );
        Ok(grade)
    }

    /// A student's grades joined with subject and period names, ordered by
    /// period number then subject name, oldest entry first within a subject.
    pub async fn grade_records(
        &self,
        student_id: i64,
        scope: PeriodScope,
    ) -> Result<Vec<GradeRecord>, DatabaseError> {
        const BASE: &str = "SELECT g.id, s.name, s.code, g.value, p.name, p.number, g.recorded_at \
                            FROM grades g \
                            JOIN subjects s ON s.id = g.subject_id \
                            JOIN periods p ON p.id = g.period_id \
                            WHERE g.student_id = ?1";
        const ORDER: &str = "ORDER BY p.number, s.name, g.id";

        let mut rows = match scope {
            PeriodScope::All => {
                self.conn()
                    .query(&format!("{BASE} {ORDER}"), [student_id])
                    .await?
            }
            PeriodScope::Period(period_id) => {
                self.conn()
                    .query(
                        &format!("{BASE} AND g.period_id = ?2 {ORDER}"),
                        libsql::params![student_id, period_id],
                    )
                    .await?
            }
        };

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        debug!(student_id, ?scope, count = records.len(), "grade query");
        Ok(records)
    }
}
