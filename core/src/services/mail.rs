//! Trait for outbound email integration.

use async_trait::async_trait;

use crate::domain::entities::account::{EMAIL_CHANGE_EXPIRY_MINUTES, RESET_CODE_EXPIRY_MINUTES};
use crate::domain::entities::registration::REGISTRATION_INTENT_TTL_MINUTES;

/// Trait for the email notifier.
///
/// Implementations live in the infrastructure layer; the error type is a
/// plain string because the flows only care that delivery failed, not why.
/// The convenience methods format the standard platform messages so every
/// flow sends the same wording.
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send an email. Returns the provider's message id.
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;

    /// Check if the address format is deliverable
    fn is_valid_email(&self, email: &str) -> bool;

    /// Send a registration confirmation code
    async fn send_confirmation_code(&self, to: &str, code: &str) -> Result<String, String> {
        let body = format!(
            "Welcome to Savora! Your confirmation code is: {}. \
             It expires in {} minutes.",
            code, REGISTRATION_INTENT_TTL_MINUTES
        );
        self.send_mail(to, "Confirm your Savora account", &body).await
    }

    /// Send a password reset code
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<String, String> {
        let body = format!(
            "Forgot your password? Use this code to reset it: {}. \
             It expires in {} minutes.",
            code, RESET_CODE_EXPIRY_MINUTES
        );
        self.send_mail(to, "Your Savora password reset code", &body)
            .await
    }

    /// Send an email change confirmation code to the candidate address
    async fn send_email_change_code(&self, to: &str, code: &str) -> Result<String, String> {
        let body = format!(
            "Confirm your new Savora email address with this code: {}. \
             It expires in {} minutes.",
            code, EMAIL_CHANGE_EXPIRY_MINUTES
        );
        self.send_mail(to, "Confirm your new Savora email", &body)
            .await
    }
}
