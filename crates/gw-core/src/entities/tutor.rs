use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation::Validator;

/// A parent, guardian, or other adult responsible for one or more students.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tutor {
    pub id: i64,
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Edge of the many-to-many tutor/student relation.
///
/// The relation label belongs to the edge, so one tutor can be `parent` of
/// one student and `guardian` of another.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TutorLink {
    pub student_id: i64,
    pub tutor_id: i64,
    pub relation: String,
    pub created_at: DateTime<Utc>,
}

/// A tutor as listed for a student, with the link's relation label.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedTutor {
    pub id: i64,
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub relation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTutor {
    pub first_name: String,
    pub paternal_surname: String,
    #[serde(default)]
    pub maternal_surname: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewTutor {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for missing names, a phone that is not
    /// 10-15 digits, or an email without a domain.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        v.length(&self.first_name, "first_name", 2, 100)
            .length(&self.paternal_surname, "paternal_surname", 2, 100);
        if let Some(phone) = &self.phone {
            v.check(is_phone(phone), "phone", "phone must be 10 to 15 digits");
        }
        if let Some(email) = &self.email {
            v.check(is_email(email), "email", "email is not a valid address");
        }
        v.finish()
    }
}

/// Phone numbers are stored as bare digits (an optional leading `+` is allowed).
#[must_use]
pub fn is_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tutor() -> NewTutor {
        NewTutor {
            first_name: "Maria".into(),
            paternal_surname: "Lopez".into(),
            maternal_surname: None,
            phone: Some("5215512345678".into()),
            email: Some("maria@example.com".into()),
        }
    }

    #[test]
    fn accepts_contact_details() {
        tutor().validate().unwrap();
        NewTutor {
            phone: None,
            email: None,
            ..tutor()
        }
        .validate()
        .unwrap();
    }

    #[test]
    fn rejects_bad_contact_details() {
        let input = NewTutor {
            phone: Some("55-1234".into()),
            email: Some("maria.example.com".into()),
            ..tutor()
        };
        let CoreError::Validation(fields) = input.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, ["phone", "email"]);
    }
}
