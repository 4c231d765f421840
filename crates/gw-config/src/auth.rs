//! Session token and credential hashing settings.

use serde::{Deserialize, Serialize};

const fn default_token_ttl_hours() -> u32 {
    24
}

const fn default_bcrypt_cost() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens.
    #[serde(default)]
    pub token_secret: String,

    /// Session token lifetime, in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u32,

    /// bcrypt work factor for stored passwords.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.token_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = AuthConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.bcrypt_cost, 10);
    }
}
