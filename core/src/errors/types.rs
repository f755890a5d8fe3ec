//! Error type definitions for authentication and token operations.
//!
//! Validation-shaped failures (duplicates, mismatched codes, not-found)
//! are expected outcomes the HTTP layer maps to 4xx responses; each
//! variant carries a stable `error_code` for that mapping. Infrastructure
//! failures live on `DomainError` directly.

use thiserror::Error;

/// Authentication and verification flow errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// A verified account already owns the handle or email
    #[error("{field} already registered to a verified account")]
    DuplicateActive { field: String },

    #[error("No account matches that email")]
    NotFound,

    #[error("Confirmation code does not match")]
    CodeMismatch,

    #[error("Code is invalid or has expired")]
    CodeInvalidOrExpired,

    #[error("Registration expired or invalid, please register again")]
    IntentExpired,

    #[error("Email already in use by another account")]
    EmailTaken,

    #[error("New email is the same as the current one")]
    SameEmail,

    #[error("Not authorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please confirm your email before signing in")]
    AccountNotVerified,

    #[error("Could not deliver the verification email")]
    MailDeliveryFailed,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl AuthError {
    /// Stable error code for the HTTP layer
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DuplicateActive { .. } => "DUPLICATE_ACTIVE",
            AuthError::NotFound => "NOT_FOUND",
            AuthError::CodeMismatch => "CODE_MISMATCH",
            AuthError::CodeInvalidOrExpired => "CODE_INVALID_OR_EXPIRED",
            AuthError::IntentExpired => "INTENT_EXPIRED",
            AuthError::EmailTaken => "EMAIL_TAKEN",
            AuthError::SameEmail => "SAME_EMAIL",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            AuthError::MailDeliveryFailed => "MAIL_DELIVERY_FAILED",
            AuthError::PasswordTooShort { .. } => "PASSWORD_TOO_SHORT",
        }
    }
}

/// Token codec errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    /// Bad signature, malformed structure, or a payload of the wrong shape
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable error code for the HTTP layer
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}
