//! Registration intent: an in-flight registration that has not yet
//! materialized an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of a registration intent (15 minutes)
pub const REGISTRATION_INTENT_TTL_MINUTES: i64 = 15;

/// An in-flight registration.
///
/// Intents are never persisted: their only durable representation is the
/// signed token handed back to the caller, so unconfirmed registrations
/// leave no trace in the account store. The confirmation code travels
/// inside the token while a copy goes out by email; confirming means
/// proving possession of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationIntent {
    /// Requested handle
    pub handle: String,

    /// Requested email address, lowercased
    pub email: String,

    /// Bcrypt hash of the chosen password (never the plaintext)
    pub password_hash: String,

    /// Confirmation code sent to the email address
    pub code: String,

    /// When this intent (or its current code) was issued
    pub issued_at: DateTime<Utc>,
}

impl RegistrationIntent {
    /// Creates a new intent for the given identity
    pub fn new(handle: String, email: String, password_hash: String, code: String) -> Self {
        Self {
            handle,
            email: email.trim().to_lowercase(),
            password_hash,
            code,
            issued_at: Utc::now(),
        }
    }

    /// Replaces the confirmation code for a resend. Handle, email and
    /// password hash are deliberately untouched: a resend re-issues the
    /// same registration, not a new one.
    pub fn regenerate(&mut self, code: String) {
        self.code = code;
        self.issued_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_intent_lowercases_email() {
        let intent = RegistrationIntent::new(
            "ana".to_string(),
            "Ana@X.com".to_string(),
            "$2b$12$hash".to_string(),
            "123456".to_string(),
        );
        assert_eq!(intent.email, "ana@x.com");
        assert_eq!(intent.code, "123456");
    }

    #[test]
    fn test_regenerate_keeps_identity() {
        let mut intent = RegistrationIntent::new(
            "ana".to_string(),
            "a@x.com".to_string(),
            "$2b$12$hash".to_string(),
            "123456".to_string(),
        );
        let before = intent.clone();

        intent.regenerate("654321".to_string());

        assert_eq!(intent.handle, before.handle);
        assert_eq!(intent.email, before.email);
        assert_eq!(intent.password_hash, before.password_hash);
        assert_eq!(intent.code, "654321");
        assert!(intent.issued_at >= before.issued_at);
    }

    #[test]
    fn test_serde_round_trip() {
        let intent = RegistrationIntent::new(
            "ana".to_string(),
            "a@x.com".to_string(),
            "$2b$12$hash".to_string(),
            "123456".to_string(),
        );
        let json = serde_json::to_string(&intent).unwrap();
        let back: RegistrationIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);
    }
}
