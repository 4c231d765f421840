//! # gw-config
//!
//! Layered configuration loading for gradewatch using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GRADEWATCH_*` prefix, `__` as separator)
//! 2. Project-level `.gradewatch/config.toml`
//! 3. User-level `~/.config/gradewatch/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GRADEWATCH_ALERTS__MINIMUM_AVERAGE` -> `alerts.minimum_average`,
//! `GRADEWATCH_AUTH__TOKEN_SECRET` -> `auth.token_secret`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use gw_config::GradewatchConfig;
//!
//! let config = GradewatchConfig::load_with_dotenv().expect("config");
//! let thresholds = config.alerts.thresholds().expect("valid thresholds");
//! println!("flagging averages below {}", thresholds.minimum_average);
//! ```

mod alerts;
mod auth;
mod bot;
mod database;
mod error;
mod server;

pub use alerts::AlertsConfig;
pub use auth::AuthConfig;
pub use bot::BotConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, env_var_name};
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "GRADEWATCH_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GradewatchConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

impl GradewatchConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".gradewatch/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check the settings the server cannot start without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when no token secret is set, or
    /// `ConfigError::InvalidValue` for out-of-range thresholds.
    pub fn validate_for_server(&self) -> Result<(), ConfigError> {
        if !self.auth.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
                setting: "token_secret".into(),
            });
        }
        self.alerts.thresholds()?;
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gradewatch").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
