//! Grading periods.

use gw_core::entities::{NewPeriod, Period};

use crate::SchoolDb;
use crate::error::DatabaseError;
use crate::helpers::get_narrow;

fn row_to_period(row: &libsql::Row) -> Result<Period, DatabaseError> {
    Ok(Period {
        id: row.get(0)?,
        number: get_narrow(row, 1)?,
        name: row.get(2)?,
    })
}

impl SchoolDb {
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` when a period with this number exists.
    pub async fn create_period(&self, input: &NewPeriod) -> Result<Period, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "INSERT INTO periods (number, name) VALUES (?1, ?2) RETURNING id, number, name",
                libsql::params![input.number, input.name.trim()],
            )
            .await
            .map_err(|e| {
                DatabaseError::on_unique(e, format!("period {} already exists", input.number))
            })?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_period(&row)
    }

    /// Periods in chronological (number) order.
    pub async fn list_periods(&self) -> Result<Vec<Period>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT id, number, name FROM periods ORDER BY number", ())
            .await?;
        let mut periods = Vec::new();
        while let Some(row) = rows.next().await? {
            periods.push(row_to_period(&row)?);
        }
        Ok(periods)
    }
}
