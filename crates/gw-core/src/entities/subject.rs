use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation::Validator;

/// A taught subject, independent of any student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    pub code: String,
}

impl NewSubject {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an empty name or a code that is
    /// not 1-10 characters.
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .length(&self.name, "name", 1, 100)
            .length(&self.code, "code", 1, 10)
            .finish()
    }
}
