//! Tutor repository and the tutor-student link table.
//!
//! The relation label (`parent`, `guardian`, ...) lives on the link, not on
//! the tutor.

use chrono::Utc;
use tracing::debug;

use gw_core::entities::{LinkedStudent, LinkedTutor, NewTutor, Tutor, TutorLink};

use crate::SchoolDb;
use crate::error::DatabaseError;
use crate::helpers::{get_narrow, get_opt_string, parse_datetime};

const SELECT_COLS: &str =
    "id, first_name, paternal_surname, maternal_surname, phone, email, created_at";

fn row_to_tutor(row: &libsql::Row) -> Result<Tutor, DatabaseError> {
    Ok(Tutor {
        id: row.get(0)?,
        first_name: row.get(1)?,
        paternal_surname: row.get(2)?,
        maternal_surname: get_opt_string(row, 3)?,
        phone: get_opt_string(row, 4)?,
        email: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn row_to_linked_tutor(row: &libsql::Row) -> Result<LinkedTutor, DatabaseError> {
    Ok(LinkedTutor {
        id: row.get(0)?,
        first_name: row.get(1)?,
        paternal_surname: row.get(2)?,
        maternal_surname: get_opt_string(row, 3)?,
        phone: get_opt_string(row, 4)?,
        email: get_opt_string(row, 5)?,
        relation: row.get(6)?,
    })
}

fn row_to_linked_student(row: &libsql::Row) -> Result<LinkedStudent, DatabaseError> {
    Ok(LinkedStudent {
        id: row.get(0)?,
        national_id: row.get(1)?,
        first_name: row.get(2)?,
        paternal_surname: row.get(3)?,
        maternal_surname: get_opt_string(row, 4)?,
        grade_level: get_narrow(row, 5)?,
        group: row.get(6)?,
        relation: row.get(7)?,
    })
}

impl SchoolDb {
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` when the email is already used.
    pub async fn create_tutor(&self, input: &NewTutor) -> Result<Tutor, DatabaseError> {
        let now = Utc::now();
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "INSERT INTO tutors (first_name, paternal_surname, maternal_surname, phone, email, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     RETURNING {SELECT_COLS}"
                ),
                libsql::params![
                    input.first_name.trim(),
                    input.paternal_surname.trim(),
                    input.maternal_surname.as_deref(),
                    input.phone.as_deref(),
                    input.email.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| DatabaseError::on_unique(e, "tutor email is already registered"))?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_tutor(&row)
    }

    pub async fn get_tutor(&self, id: i64) -> Result<Option<Tutor>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tutors WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_tutor).transpose()
    }

    /// Link a tutor to a student under a relation label.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown tutor or student and
    /// `DatabaseError::Conflict` when the pair is already linked.
    pub async fn link_tutor(
        &self,
        tutor_id: i64,
        student_id: i64,
        relation: &str,
    ) -> Result<TutorLink, DatabaseError> {
        self.ensure_exists("tutors", "tutor", tutor_id).await?;
        self.ensure_exists("students", "student", student_id)
            .await?;

        let now = Utc::now();
        self.conn()
            .execute(
                "INSERT INTO student_tutors (student_id, tutor_id, relation, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![student_id, tutor_id, relation.trim(), now.to_rfc3339()],
            )
            .await
            .map_err(|e| {
                DatabaseError::on_unique(
                    e,
                    format!("tutor {tutor_id} is already linked to student {student_id}"),
                )
            })?;
        debug!(tutor_id, student_id, relation, "tutor linked");

        Ok(TutorLink {
            student_id,
            tutor_id,
            relation: relation.trim().to_string(),
            created_at: now,
        })
    }

    /// Remove a tutor-student link. Returns whether a link existed.
    pub async fn unlink_tutor(&self, tutor_id: i64, student_id: i64) -> Result<bool, DatabaseError> {
        let removed = self
            .conn()
            .execute(
                "DELETE FROM student_tutors WHERE tutor_id = ?1 AND student_id = ?2",
                libsql::params![tutor_id, student_id],
            )
            .await?;
        Ok(removed > 0)
    }

    /// Tutors linked to a student, ordered by surname.
    pub async fn linked_tutors(&self, student_id: i64) -> Result<Vec<LinkedTutor>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT t.id, t.first_name, t.paternal_surname, t.maternal_surname, t.phone, t.email, st.relation
                 FROM tutors t
                 JOIN student_tutors st ON st.tutor_id = t.id
                 WHERE st.student_id = ?1
                 ORDER BY t.paternal_surname, t.first_name",
                [student_id],
            )
            .await?;
        let mut tutors = Vec::new();
        while let Some(row) = rows.next().await? {
            tutors.push(row_to_linked_tutor(&row)?);
        }
        Ok(tutors)
    }

    /// Students linked to a tutor, ordered by grade level, group, surname.
    pub async fn linked_students(&self, tutor_id: i64) -> Result<Vec<LinkedStudent>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT s.id, s.national_id, s.first_name, s.paternal_surname, s.maternal_surname,
                        s.grade_level, s.group_name, st.relation
                 FROM students s
                 JOIN student_tutors st ON st.student_id = s.id
                 WHERE st.tutor_id = ?1
                 ORDER BY s.grade_level, s.group_name, s.paternal_surname",
                [tutor_id],
            )
            .await?;
        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_linked_student(&row)?);
        }
        Ok(students)
    }

    pub async fn has_link(&self, tutor_id: i64, student_id: i64) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT 1 FROM student_tutors WHERE tutor_id = ?1 AND student_id = ?2",
                libsql::params![tutor_id, student_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}
