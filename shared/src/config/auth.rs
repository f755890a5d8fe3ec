//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
///
/// One shared secret signs every token the platform issues: session tokens
/// and registration intent tokens alike. The secret is loaded once at
/// startup and handed to the token codec explicitly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// Session token lifetime in days
    pub session_expiry_days: i64,

    /// Registration intent token lifetime in minutes
    pub intent_expiry_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-in-production"),
            issuer: String::from("savora"),
            session_expiry_days: 30,
            intent_expiry_minutes: 15,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-change-in-production"
    }
}
