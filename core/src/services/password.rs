//! Password hashing and policy.
//!
//! Hashing is an explicit step inside each flow, invoked before any
//! persistence call. Repositories only ever see hashes; there is no
//! hash-on-save hook anywhere that could re-hash on unrelated writes.

use crate::errors::{AuthError, DomainError, DomainResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Check the password against policy before hashing it.
pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        }
        .into());
    }
    Ok(())
}

/// Hash a password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Verify a password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| DomainError::Internal {
        message: format!("Failed to verify password: {}", e),
    })
}
