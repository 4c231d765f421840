//! Student repository: registration, lookup, credential fetch, listing.

use chrono::Utc;
use tracing::debug;

use gw_core::entities::{NewStudent, Student};

use crate::SchoolDb;
use crate::error::DatabaseError;
use crate::helpers::{get_narrow, get_opt_string, parse_datetime};

const SELECT_COLS: &str = "id, national_id, first_name, paternal_surname, maternal_surname, \
                           grade_level, group_name, created_at";

pub(crate) fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get(0)?,
        national_id: row.get(1)?,
        first_name: row.get(2)?,
        paternal_surname: row.get(3)?,
        maternal_surname: get_opt_string(row, 4)?,
        grade_level: get_narrow(row, 5)?,
        group: row.get(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl SchoolDb {
    /// Register a student. The caller hashes the password.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` when the national ID is taken.
    pub async fn create_student(
        &self,
        input: &NewStudent,
        password_hash: &str,
    ) -> Result<Student, DatabaseError> {
        let now = Utc::now();
        let national_id = input.national_id.trim().to_uppercase();
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "INSERT INTO students (national_id, first_name, paternal_surname, maternal_surname, \
                     grade_level, group_name, password_hash, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                     RETURNING {SELECT_COLS}"
                ),
                libsql::params![
                    national_id.as_str(),
                    input.first_name.trim(),
                    input.paternal_surname.trim(),
                    input.maternal_surname.as_deref().map(str::trim),
                    input.grade_level,
                    input.group.as_str(),
                    password_hash,
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                DatabaseError::on_unique(e, format!("national_id {national_id} is already registered"))
            })?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let student = row_to_student(&row)?;
        debug!(student_id = student.id, "student registered");
        Ok(student)
    }

    pub async fn get_student(&self, id: i64) -> Result<Option<Student>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_student).transpose()
    }

    /// Student and stored password hash for a login attempt.
    pub async fn find_student_credentials(
        &self,
        national_id: &str,
    ) -> Result<Option<(Student, String)>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS}, password_hash FROM students WHERE national_id = ?1"),
                [national_id.trim().to_uppercase()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => {
                let student = row_to_student(&row)?;
                let hash: String = row.get(8)?;
                Ok(Some((student, hash)))
            }
            None => Ok(None),
        }
    }

    /// All students ordered by grade level, group, then paternal surname.
    pub async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM students \
                     ORDER BY grade_level, group_name, paternal_surname, first_name"
                ),
                (),
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    /// Replace a student's password hash.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no such student exists.
    pub async fn set_student_password(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE students SET password_hash = ?1 WHERE id = ?2",
                libsql::params![password_hash, id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "student",
                id,
            });
        }
        Ok(())
    }
}
