//! Environment detection

use serde::{Deserialize, Serialize};

/// Process environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Detect the environment from the `SAVORA_ENV` variable,
    /// defaulting to development.
    pub fn from_env() -> Self {
        match std::env::var("SAVORA_ENV").as_deref() {
            Ok("production") => Environment::Production,
            Ok("staging") => Environment::Staging,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}
