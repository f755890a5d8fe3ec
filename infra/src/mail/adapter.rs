//! Mail service trait adapter
//!
//! Bridges any infrastructure `MailService` onto the core
//! `MailServiceTrait` the flow services are generic over.

use async_trait::async_trait;

use sav_core::services::mail::MailServiceTrait;
use sav_shared::utils::validation::is_valid_email;

use crate::mail::mail_service::MailService;

/// Adapter implementing the core mail trait over any provider
pub struct MailServiceAdapter<M: MailService> {
    inner: M,
}

impl<M: MailService> MailServiceAdapter<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// Access the wrapped provider
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

#[async_trait]
impl<M: MailService> MailServiceTrait for MailServiceAdapter<M> {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        self.inner
            .send_mail(to, subject, body)
            .await
            .map_err(|e| e.to_string())
    }

    fn is_valid_email(&self, email: &str) -> bool {
        is_valid_email(email)
    }
}
