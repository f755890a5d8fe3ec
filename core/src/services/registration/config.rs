//! Configuration for the registration flow

use crate::domain::entities::registration::REGISTRATION_INTENT_TTL_MINUTES;

/// Configuration for the registration flow
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// Minutes before a registration intent token expires
    pub intent_ttl_minutes: i64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            intent_ttl_minutes: REGISTRATION_INTENT_TTL_MINUTES,
        }
    }
}
