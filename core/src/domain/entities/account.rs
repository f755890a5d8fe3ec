//! Account entity representing a registered member of the Savora platform.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a password reset code (10 minutes)
pub const RESET_CODE_EXPIRY_MINUTES: i64 = 10;

/// Lifetime of an email change code (10 minutes)
pub const EMAIL_CHANGE_EXPIRY_MINUTES: i64 = 10;

/// Account entity persisted in the account store.
///
/// `email` is stored lowercased; all email comparisons on the platform are
/// case-insensitive. `password_hash` only ever holds a bcrypt hash: the
/// flows hash explicitly before anything reaches a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Unique public handle
    pub handle: String,

    /// Unique email address, lowercased
    pub email: String,

    /// Bcrypt hash of the account password
    pub password_hash: String,

    /// Whether the account completed email confirmation
    pub is_verified: bool,

    /// Active password reset code, if any
    pub reset_code: Option<String>,

    /// Expiry of the active password reset code
    pub reset_expires_at: Option<DateTime<Utc>>,

    /// Candidate address of an in-flight email change
    pub pending_email: Option<String>,

    /// Code proving ownership of the candidate address
    pub email_change_code: Option<String>,

    /// Expiry of the email change code
    pub email_change_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new, unverified account. The email is lowercased here so
    /// no caller can slip a mixed-case address into the store.
    pub fn new(handle: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            handle,
            email: email.trim().to_lowercase(),
            password_hash,
            is_verified: false,
            reset_code: None,
            reset_expires_at: None,
            pending_email: None,
            email_change_code: None,
            email_change_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Case-insensitive email comparison
    pub fn email_matches(&self, other: &str) -> bool {
        self.email == other.trim().to_lowercase()
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.updated_at = Utc::now();
    }

    /// Installs a password reset code with the standard expiry.
    /// Any previously issued code is overwritten and thereby invalidated.
    pub fn set_reset_code(&mut self, code: String) {
        let now = Utc::now();
        self.reset_code = Some(code);
        self.reset_expires_at = Some(now + Duration::minutes(RESET_CODE_EXPIRY_MINUTES));
        self.updated_at = now;
    }

    /// Clears the reset code pair
    pub fn clear_reset_code(&mut self) {
        self.reset_code = None;
        self.reset_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Whether an unexpired reset code is present
    pub fn has_active_reset_code(&self) -> bool {
        match (&self.reset_code, self.reset_expires_at) {
            (Some(_), Some(expires_at)) => Utc::now() < expires_at,
            _ => false,
        }
    }

    /// Installs an email change intent: the candidate address plus a code
    /// with the standard expiry. At most one change is in flight; a new
    /// request overwrites the previous one.
    pub fn set_email_change(&mut self, candidate_email: String, code: String) {
        let now = Utc::now();
        self.pending_email = Some(candidate_email.trim().to_lowercase());
        self.email_change_code = Some(code);
        self.email_change_expires_at =
            Some(now + Duration::minutes(EMAIL_CHANGE_EXPIRY_MINUTES));
        self.updated_at = now;
    }

    /// Clears the email change triple
    pub fn clear_email_change(&mut self) {
        self.pending_email = None;
        self.email_change_code = None;
        self.email_change_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Whether an unexpired email change code is present
    pub fn has_active_email_change(&self) -> bool {
        match (&self.email_change_code, self.email_change_expires_at) {
            (Some(_), Some(expires_at)) => Utc::now() < expires_at,
            _ => false,
        }
    }

    /// Promotes the candidate email to the account's address and clears
    /// the change fields. Returns false if no candidate was pending.
    pub fn promote_pending_email(&mut self) -> bool {
        match self.pending_email.take() {
            Some(candidate) => {
                self.email = candidate;
                self.email_change_code = None;
                self.email_change_expires_at = None;
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account() -> Account {
        Account::new(
            "ana".to_string(),
            "Ana@Example.com".to_string(),
            "$2b$12$hash".to_string(),
        )
    }

    #[test]
    fn test_new_account_is_unverified_and_lowercased() {
        let account = test_account();
        assert!(!account.is_verified);
        assert_eq!(account.email, "ana@example.com");
        assert!(account.reset_code.is_none());
        assert!(account.pending_email.is_none());
    }

    #[test]
    fn test_verify() {
        let mut account = test_account();
        account.verify();
        assert!(account.is_verified);
    }

    #[test]
    fn test_email_matches_is_case_insensitive() {
        let account = test_account();
        assert!(account.email_matches("ANA@example.COM"));
        assert!(account.email_matches(" ana@example.com "));
        assert!(!account.email_matches("other@example.com"));
    }

    #[test]
    fn test_reset_code_lifecycle() {
        let mut account = test_account();
        assert!(!account.has_active_reset_code());

        account.set_reset_code("123456".to_string());
        assert!(account.has_active_reset_code());
        assert_eq!(account.reset_code.as_deref(), Some("123456"));

        account.clear_reset_code();
        assert!(!account.has_active_reset_code());
        assert!(account.reset_expires_at.is_none());
    }

    #[test]
    fn test_new_reset_code_overwrites_previous() {
        let mut account = test_account();
        account.set_reset_code("111111".to_string());
        account.set_reset_code("222222".to_string());
        assert_eq!(account.reset_code.as_deref(), Some("222222"));
    }

    #[test]
    fn test_email_change_lifecycle() {
        let mut account = test_account();
        account.set_email_change("New@Mail.com".to_string(), "654321".to_string());
        assert!(account.has_active_email_change());
        assert_eq!(account.pending_email.as_deref(), Some("new@mail.com"));

        assert!(account.promote_pending_email());
        assert_eq!(account.email, "new@mail.com");
        assert!(account.pending_email.is_none());
        assert!(account.email_change_code.is_none());
        assert!(!account.has_active_email_change());
    }

    #[test]
    fn test_promote_without_pending_is_noop() {
        let mut account = test_account();
        assert!(!account.promote_pending_email());
        assert_eq!(account.email, "ana@example.com");
    }
}
