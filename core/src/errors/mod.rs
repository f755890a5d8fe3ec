//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Account store unavailable or misbehaving
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Stable error code for the HTTP layer
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Database { .. } => "STORE_FAILURE",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
        }
    }

    /// Whether this is an expected validation-shaped outcome (4xx)
    /// rather than an infrastructure failure (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. } | DomainError::Auth(_) | DomainError::Token(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_bridges_into_domain_error() {
        let err: DomainError = AuthError::CodeMismatch.into();
        assert_eq!(err.error_code(), "CODE_MISMATCH");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_store_failure_is_not_client_error() {
        let err = DomainError::Database {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.error_code(), "STORE_FAILURE");
        assert!(!err.is_client_error());
    }
}
