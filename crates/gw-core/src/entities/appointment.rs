use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::tutor::is_phone;
use crate::enums::AppointmentStatus;
use crate::errors::CoreError;
use crate::validation::Validator;

/// An appointment requested through the chatbot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Appointment {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24-hour clock
    pub time: String,
    pub service: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAppointment {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub service: String,
    #[serde(default)]
    pub notes: Option<String>,
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

impl NewAppointment {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a missing name or service, a
    /// malformed phone, or a date/time that does not parse.
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .length(&self.name, "name", 2, 100)
            .check(is_phone(&self.phone), "phone", "phone must be 10 to 15 digits")
            .check(
                NaiveDate::parse_from_str(&self.date, DATE_FORMAT).is_ok(),
                "date",
                "date must be YYYY-MM-DD",
            )
            .check(
                NaiveTime::parse_from_str(&self.time, TIME_FORMAT).is_ok(),
                "time",
                "time must be HH:MM",
            )
            .length(&self.service, "service", 1, 100)
            .finish()
    }

    /// Validate, then rewrite date and time in zero-padded form so stored
    /// values sort chronologically as text ("9:5" becomes "09:05").
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn normalize(self) -> Result<Self, CoreError> {
        self.validate()?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|_| CoreError::invalid("date", "date must be YYYY-MM-DD"))?;
        let time = NaiveTime::parse_from_str(&self.time, TIME_FORMAT)
            .map_err(|_| CoreError::invalid("time", "time must be HH:MM"))?;
        Ok(Self {
            name: self.name.trim().to_string(),
            service: self.service.trim().to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            ..self
        })
    }
}

/// Appointment counts, overall and per status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub completed: u64,
}

impl AppointmentStats {
    /// Add `count` appointments in `status` to the tally.
    pub const fn add(&mut self, status: AppointmentStatus, count: u64) {
        match status {
            AppointmentStatus::Pending => self.pending += count,
            AppointmentStatus::Confirmed => self.confirmed += count,
            AppointmentStatus::Cancelled => self.cancelled += count,
            AppointmentStatus::Completed => self.completed += count,
        }
        self.total += count;
    }
}
