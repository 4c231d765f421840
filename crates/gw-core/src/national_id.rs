//! National ID (CURP-format) parsing.
//!
//! A national ID is exactly 18 characters: 4 letters, 6 digits (birth date),
//! a sex marker `H` or `M`, 5 letters, 1 alphanumeric and 1 check digit.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Required length of a national ID.
pub const NATIONAL_ID_LEN: usize = 18;

static NATIONAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{4}\d{6}[HM][A-Z]{5}[0-9A-Z]\d$").expect("static national id pattern")
});

/// A validated national ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Parse and validate a national ID. Input is not case-folded.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on field `national_id` when the value is
    /// empty, has the wrong length, or does not match the pattern.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        if value.is_empty() {
            return Err(CoreError::invalid("national_id", "national_id is required"));
        }
        if value.chars().count() != NATIONAL_ID_LEN {
            return Err(CoreError::invalid(
                "national_id",
                "national_id must be 18 characters",
            ));
        }
        if !NATIONAL_ID_RE.is_match(value) {
            return Err(CoreError::invalid(
                "national_id",
                "national_id has an invalid format",
            ));
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NationalId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> Self {
        id.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
