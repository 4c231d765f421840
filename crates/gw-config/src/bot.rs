//! WhatsApp chatbot relay target.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:3002".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Base URL of the chatbot process.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
