use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation::Validator;

/// An academic term. Periods are ordered by `number`, starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Period {
    pub id: i64,
    pub number: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewPeriod {
    pub number: i64,
    pub name: String,
}

impl NewPeriod {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when `number` is not positive or the
    /// name is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        Validator::new()
            .check(self.number >= 1, "number", "number must be a positive integer")
            .length(&self.name, "name", 1, 100)
            .finish()
    }
}
