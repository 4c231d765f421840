//! Database migration runner.
//!
//! Embeds the SQL schema at compile time and executes it on database open.
//! All statements use `IF NOT EXISTS` for idempotent re-running.

use tracing::debug;

use crate::SchoolDb;
use crate::error::DatabaseError;

/// Initial schema: 7 tables, 4 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl SchoolDb {
    /// Run all embedded migrations in sequence.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` naming the failing migration.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        debug!("migrations applied");
        Ok(())
    }
}
