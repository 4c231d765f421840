use std::sync::Arc;
use std::time::Duration;

use gw_auth::TokenSigner;
use gw_auth::password::decoy_hash;
use gw_config::GradewatchConfig;
use gw_core::risk::RiskThresholds;
use gw_db::SchoolDb;

use crate::bot::BotClient;
use crate::error::ServerError;

/// Read-only state shared by every request.
pub struct AppState {
    pub db: SchoolDb,
    pub thresholds: RiskThresholds,
    pub signer: TokenSigner,
    pub bot: BotClient,
    pub bcrypt_cost: u32,
    /// Verified against on logins for unknown national IDs.
    pub decoy_hash: String,
    pub allowed_origins: Vec<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Assemble the state from loaded configuration and an open store.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` for an invalid threshold, a missing token secret
    /// a malformed bot URL or an invalid bcrypt cost.
    pub fn from_config(config: &GradewatchConfig, db: SchoolDb) -> Result<Self, ServerError> {
        config.validate_for_server()?;
        Ok(Self {
            db,
            thresholds: config.alerts.thresholds()?,
            signer: TokenSigner::new(&config.auth.token_secret, config.auth.token_ttl_hours)?,
            bot: BotClient::new(&config.bot.url, Duration::from_secs(config.bot.timeout_secs))?,
            bcrypt_cost: config.auth.bcrypt_cost,
            decoy_hash: decoy_hash(config.auth.bcrypt_cost)?,
            allowed_origins: config.server.allowed_origins.clone(),
        })
    }
}
