//! Appointment repository: CRUD, phone lookup, status transitions, stats.

use chrono::Utc;
use tracing::debug;

use gw_core::entities::{Appointment, AppointmentStats, NewAppointment};
use gw_core::enums::AppointmentStatus;

use crate::SchoolDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};

const SELECT_COLS: &str =
    "id, name, phone, date, time, service, notes, status, created_at, updated_at";

fn row_to_appointment(row: &libsql::Row) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        service: row.get(5)?,
        notes: get_opt_string(row, 6)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Appointment>, DatabaseError> {
    let mut appointments = Vec::new();
    while let Some(row) = rows.next().await? {
        appointments.push(row_to_appointment(&row)?);
    }
    Ok(appointments)
}

impl SchoolDb {
    pub async fn create_appointment(
        &self,
        input: &NewAppointment,
    ) -> Result<Appointment, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "INSERT INTO appointments (name, phone, date, time, service, notes, status, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                     RETURNING {SELECT_COLS}"
                ),
                libsql::params![
                    input.name.trim(),
                    input.phone.as_str(),
                    input.date.as_str(),
                    input.time.as_str(),
                    input.service.trim(),
                    input.notes.as_deref(),
                    AppointmentStatus::Pending.as_str(),
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let appointment = row_to_appointment(&row)?;
        debug!(appointment_id = appointment.id, "appointment created");
        Ok(appointment)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no appointment has this id.
    pub async fn get_appointment(&self, id: i64) -> Result<Appointment, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM appointments WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity_type: "appointment",
            id,
        })?;
        row_to_appointment(&row)
    }

    /// Appointments, soonest first, optionally filtered by status.
    pub async fn list_appointments(
        &self,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let rows = match status {
            Some(status) => {
                self.conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM appointments WHERE status = ?1 ORDER BY date, time"
                        ),
                        [status.as_str()],
                    )
                    .await?
            }
            None => {
                self.conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM appointments ORDER BY date, time"),
                        (),
                    )
                    .await?
            }
        };
        collect(rows).await
    }

    /// Appointments booked from `phone`, most recent date first.
    pub async fn appointments_by_phone(
        &self,
        phone: &str,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM appointments WHERE phone = ?1 ORDER BY date DESC, time DESC"
                ),
                [phone],
            )
            .await?;
        collect(rows).await
    }

    /// Move an appointment to `next`, enforcing the status machine.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id and
    /// `DatabaseError::InvalidTransition` when the move is not allowed.
    pub async fn transition_appointment(
        &self,
        id: i64,
        next: AppointmentStatus,
    ) -> Result<Appointment, DatabaseError> {
        let current = self.get_appointment(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(DatabaseError::InvalidTransition {
                id,
                from: current.status,
                to: next,
            });
        }

        let now = Utc::now();
        self.conn()
            .execute(
                "UPDATE appointments SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![next.as_str(), now.to_rfc3339(), id],
            )
            .await?;
        debug!(appointment_id = id, from = %current.status, to = %next, "appointment transitioned");

        Ok(Appointment {
            status: next,
            updated_at: now,
            ..current
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no appointment has this id.
    pub async fn delete_appointment(&self, id: i64) -> Result<(), DatabaseError> {
        let removed = self
            .conn()
            .execute("DELETE FROM appointments WHERE id = ?1", [id])
            .await?;
        if removed == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "appointment",
                id,
            });
        }
        Ok(())
    }

    pub async fn appointment_stats(&self) -> Result<AppointmentStats, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT status, COUNT(*) FROM appointments GROUP BY status",
                (),
            )
            .await?;
        let mut stats = AppointmentStats::default();
        while let Some(row) = rows.next().await? {
            let status: AppointmentStatus = parse_enum(&row.get::<String>(0)?)?;
            let count = u64::try_from(row.get::<i64>(1)?).unwrap_or_default();
            stats.add(status, count);
        }
        Ok(stats)
    }
}
