//! Configuration for the session issuer

/// Session token lifetime (30 days)
pub const SESSION_EXPIRY_DAYS: i64 = 30;

/// Configuration for the session issuer
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session token lifetime in days
    pub expiry_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_days: SESSION_EXPIRY_DAYS,
        }
    }
}
