//! Field-level validation helpers shared by the `New*` input structs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One rejected input field and the reason it was rejected.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Accumulates field errors so callers report every problem at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Require a trimmed string whose char count falls within `min..=max`.
    pub fn length(&mut self, value: &str, field: &str, min: usize, max: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len == 0 && min > 0 {
            self.errors
                .push(FieldError::new(field, &format!("{field} is required")));
        } else if len < min || len > max {
            self.errors.push(FieldError::new(
                field,
                &format!("{field} must be between {min} and {max} characters"),
            ));
        }
        self
    }

    /// Finish validation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` carrying every recorded failure.
    pub fn finish(&mut self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_validator_passes() {
        assert!(Validator::new().finish().is_ok());
    }

    #[test]
    fn collects_all_failures_in_order() {
        let err = Validator::new()
            .length("", "first_name", 2, 100)
            .length("x", "paternal_surname", 2, 100)
            .check(false, "group", "bad group")
            .finish()
            .unwrap_err();
        let CoreError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, ["first_name", "paternal_surname", "group"]);
        assert_eq!(fields[0].message, "first_name is required");
    }
}
