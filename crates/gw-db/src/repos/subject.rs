//! Subject catalog.

use gw_core::entities::{NewSubject, Subject};

use crate::SchoolDb;
use crate::error::DatabaseError;

fn row_to_subject(row: &libsql::Row) -> Result<Subject, DatabaseError> {
    Ok(Subject {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
    })
}

impl SchoolDb {
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` when the code is already used.
    pub async fn create_subject(&self, input: &NewSubject) -> Result<Subject, DatabaseError> {
        let code = input.code.trim().to_uppercase();
        let mut rows = self
            .conn()
            .query(
                "INSERT INTO subjects (name, code) VALUES (?1, ?2) RETURNING id, name, code",
                libsql::params![input.name.trim(), code.as_str()],
            )
            .await
            .map_err(|e| DatabaseError::on_unique(e, format!("subject code {code} already exists")))?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_subject(&row)
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT id, name, code FROM subjects ORDER BY name", ())
            .await?;
        let mut subjects = Vec::new();
        while let Some(row) = rows.next().await? {
            subjects.push(row_to_subject(&row)?);
        }
        Ok(subjects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_db;

    #[tokio::test]
    async fn codes_are_normalized_and_unique() {
        let db = test_db().await;
        let math = db
            .create_subject(&NewSubject {
                name: "Mathematics".into(),
                code: "mat1".into(),
            })
            .await
            .unwrap();
        assert_eq!(math.code, "MAT1");

        let err = db
            .create_subject(&NewSubject {
                name: "Maths again".into(),
                code: "MAT1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
        assert_eq!(db.list_subjects().await.unwrap().len(), 1);
    }
}
