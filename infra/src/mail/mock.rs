//! Mock mail service implementation
//!
//! Logs messages instead of sending them; used in development and tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use sav_shared::utils::validation::{is_valid_email, mask_email};

use crate::mail::mail_service::MailService;
use crate::InfrastructureError;

/// Mock mail service for development and testing
#[derive(Clone)]
pub struct MockMailService {
    /// Counter of messages "sent"
    message_count: Arc<AtomicU64>,
    /// Whether to simulate delivery failures
    simulate_failure: bool,
}

impl MockMailService {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock that fails every send
    pub fn with_failures() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Mail(format!(
                "Invalid recipient address: {}",
                mask_email(to)
            )));
        }

        if self.simulate_failure {
            warn!(to = %mask_email(to), "Mock mailer simulating delivery failure");
            return Err(InfrastructureError::Mail(
                "Simulated mail delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            to = %mask_email(to),
            subject = subject,
            body = body,
            count = count,
            "Mock mail delivered"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
