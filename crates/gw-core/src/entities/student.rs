use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::national_id::NationalId;
use crate::validation::Validator;

/// An enrolled student. The credential hash is stored separately and never
/// leaves the store inside this struct.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub national_id: String,
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub grade_level: u8,
    pub group: String,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// First name followed by the paternal surname.
    #[must_use]
    pub fn short_name(&self) -> String {
        format!("{} {}", self.first_name, self.paternal_surname)
    }

    #[must_use]
    pub fn brief(&self) -> StudentBrief {
        StudentBrief {
            id: self.id,
            name: self.short_name(),
            grade_level: self.grade_level,
            group: self.group.clone(),
        }
    }
}

/// Compact student identity used in risk reports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentBrief {
    pub id: i64,
    pub name: String,
    pub grade_level: u8,
    pub group: String,
}

/// A student as seen from a tutor, carrying the link's relation label.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedStudent {
    pub id: i64,
    pub national_id: String,
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub grade_level: u8,
    pub group: String,
    pub relation: String,
}

/// Input for registering a student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewStudent {
    pub national_id: String,
    pub first_name: String,
    pub paternal_surname: String,
    #[serde(default)]
    pub maternal_surname: Option<String>,
    pub grade_level: i64,
    pub group: String,
    pub password: String,
}

/// Minimum password length accepted at registration and login.
pub const MIN_PASSWORD_LEN: usize = 6;

impl NewStudent {
    /// Validate every field, reporting all violations together.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing each rejected field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        if let Err(CoreError::Validation(fields)) = NationalId::parse(&self.national_id) {
            for f in fields {
                v.check(false, &f.field, &f.message);
            }
        }
        v.length(&self.first_name, "first_name", 2, 100)
            .length(&self.paternal_surname, "paternal_surname", 2, 100);
        if let Some(maternal) = &self.maternal_surname {
            v.check(
                maternal.chars().count() <= 100,
                "maternal_surname",
                "maternal_surname must be at most 100 characters",
            );
        }
        v.check(
            (1..=3).contains(&self.grade_level),
            "grade_level",
            "grade_level must be 1, 2 or 3",
        )
        .check(
            is_group_letter(&self.group),
            "group",
            "group must be a single uppercase letter",
        )
        .check(
            self.password.chars().count() >= MIN_PASSWORD_LEN,
            "password",
            "password must be at least 6 characters",
        )
        .finish()
    }
}

fn is_group_letter(group: &str) -> bool {
    let mut chars = group.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}
