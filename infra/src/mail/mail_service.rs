//! Mail Service Interface
//!
//! Defines the trait for mail delivery implementations.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Mail service trait for sending transactional email
///
/// Implementations include:
/// - HTTP transactional email provider API
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send an email message
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient address
    /// * `subject` - Message subject
    /// * `body` - Plain-text message body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available.
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
