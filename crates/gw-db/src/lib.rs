//! # gw-db
//!
//! libSQL grade store for gradewatch.
//!
//! Holds all relational state: students (with their credential hashes),
//! subjects, periods, grade records, tutors, tutor-student links and
//! chatbot appointments. Repository methods live in [`repos`] as
//! `impl SchoolDb` blocks; [`records`] implements the
//! [`gw_core::records::AcademicRecords`] read seam on top of them.

pub mod error;
pub mod helpers;
mod migrations;
pub mod records;
pub mod repos;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tracing::debug;

/// Central database handle for all gradewatch state.
///
/// Wraps a libSQL database and one connection. Cloning is not supported;
/// share it behind an `Arc`.
pub struct SchoolDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SchoolDb {
    /// Open a local database at `path` (`":memory:"` for a throwaway store).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let school_db = Self { db, conn };
        school_db.run_migrations().await?;
        debug!(path, "grade store opened");
        Ok(school_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Fail with `NotFound` unless `table` has a row with this id.
    pub(crate) async fn ensure_exists(
        &self,
        table: &str,
        entity_type: &'static str,
        id: i64,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound { entity_type, id }),
        }
    }
}
