//! Outbound email provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the transactional email provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Base URL of the provider's message API
    pub api_url: String,

    /// API key used for authentication
    pub api_key: String,

    /// Sender address shown on outgoing mail
    pub from_address: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Maximum retry attempts for failed sends
    pub max_retries: u32,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.mail.example.com/v1/messages"),
            api_key: String::new(),
            from_address: String::from("Savora <no-reply@savora.app>"),
            request_timeout_secs: 30,
            max_retries: 3,
        }
    }
}
