//! Errors raised while loading or checking gradewatch settings.

use thiserror::Error;

use crate::ENV_PREFIX;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or env var failed to parse.
    #[error("could not load gradewatch settings: {0}")]
    Figment(#[from] figment::Error),

    /// A setting the server needs is empty.
    #[error(
        "[{section}] is not configured: set {setting} in config.toml or {}, or run `gradewatch init`",
        env_var_name(.section, .setting)
    )]
    NotConfigured { section: String, setting: String },

    /// A setting is present but out of range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Environment variable that overrides `section.setting`.
#[must_use]
pub fn env_var_name(section: &str, setting: &str) -> String {
    format!(
        "{ENV_PREFIX}{}__{}",
        section.to_ascii_uppercase(),
        setting.to_ascii_uppercase()
    )
}
