//! Configuration for the token codec

use sav_shared::config::JwtConfig;

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Shared signing secret
    pub secret: String,
    /// Issuer claim stamped on and required from every token
    pub issuer: String,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-change-in-production".to_string(),
            issuer: "savora".to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
        }
    }
}
