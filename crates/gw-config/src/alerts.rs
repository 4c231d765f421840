//! Academic-risk thresholds.

use gw_core::risk::{MAX_GRADE, MIN_GRADE, RiskThresholds};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_minimum_average() -> f64 {
    RiskThresholds::DEFAULT_MINIMUM_AVERAGE
}

const fn default_max_failed_subjects() -> u32 {
    RiskThresholds::DEFAULT_MAX_FAILED_SUBJECTS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertsConfig {
    /// Averages strictly below this flag a student.
    #[serde(default = "default_minimum_average")]
    pub minimum_average: f64,

    /// Failed-subject counts strictly above this flag a student.
    #[serde(default = "default_max_failed_subjects")]
    pub max_failed_subjects: u32,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            minimum_average: default_minimum_average(),
            max_failed_subjects: default_max_failed_subjects(),
        }
    }
}

impl AlertsConfig {
    /// Thresholds to hand to the risk evaluator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `minimum_average` is outside
    /// the grading scale.
    pub fn thresholds(&self) -> Result<RiskThresholds, ConfigError> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&self.minimum_average) {
            return Err(ConfigError::InvalidValue {
                field: "alerts.minimum_average".into(),
                reason: format!(
                    "{} is outside the grading scale {MIN_GRADE}..={MAX_GRADE}",
                    self.minimum_average
                ),
            });
        }
        Ok(RiskThresholds {
            minimum_average: self.minimum_average,
            max_failed_subjects: self.max_failed_subjects,
        })
    }
}
