//! HTTP transactional email provider client
//!
//! Sends mail through a provider message API authenticated with an API
//! key over HTTP basic auth. Retries transient failures (429 and 5xx)
//! with exponential backoff; client errors fail fast.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, warn};

use sav_shared::config::MailConfig;
use sav_shared::utils::validation::mask_email;

use crate::mail::mail_service::MailService;
use crate::InfrastructureError;

/// HTTP mailer configuration
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Base URL of the provider's message endpoint
    pub api_url: String,
    /// API key
    pub api_key: String,
    /// Sender address for outgoing mail
    pub from_address: String,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl HttpMailerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("SAVORA_MAIL_API_URL")
            .map_err(|_| InfrastructureError::Config("SAVORA_MAIL_API_URL not set".to_string()))?;
        let api_key = std::env::var("SAVORA_MAIL_API_KEY")
            .map_err(|_| InfrastructureError::Config("SAVORA_MAIL_API_KEY not set".to_string()))?;
        let from_address = std::env::var("SAVORA_MAIL_FROM")
            .map_err(|_| InfrastructureError::Config("SAVORA_MAIL_FROM not set".to_string()))?;

        Ok(Self {
            api_url,
            api_key,
            from_address,
            max_retries: std::env::var("SAVORA_MAIL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("SAVORA_MAIL_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("SAVORA_MAIL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

impl From<&MailConfig> for HttpMailerConfig {
    fn from(config: &MailConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: 1000,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// HTTP email provider implementation
pub struct HttpApiMailer {
    client: reqwest::Client,
    config: HttpMailerConfig,
    auth_header: String,
}

impl HttpApiMailer {
    /// Create a new HTTP mailer
    pub fn new(config: HttpMailerConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let auth_header = format!(
            "Basic {}",
            BASE64.encode(format!("api:{}", config.api_key))
        );

        info!(
            from = %config.from_address,
            "HTTP mailer initialized"
        );

        Ok(Self {
            client,
            config,
            auth_header,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(HttpMailerConfig::from_env()?)
    }

    async fn send_with_retry(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                attempt = attempts,
                max = self.config.max_retries,
                to = %mask_email(to),
                "Sending mail"
            );

            let result = self
                .client
                .post(&self.config.api_url)
                .header("Authorization", &self.auth_header)
                .json(&json!({
                    "from": self.config.from_address,
                    "to": to,
                    "subject": subject,
                    "text": body,
                }))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    let parsed: SendResponse = response.json().await.map_err(|e| {
                        InfrastructureError::Mail(format!("Malformed provider response: {}", e))
                    })?;
                    info!(
                        to = %mask_email(to),
                        message_id = %parsed.id,
                        "Mail accepted by provider"
                    );
                    return Ok(parsed.id);
                }
                Ok(response) => {
                    let status = response.status();
                    let retryable = status.as_u16() == 429 || status.is_server_error();

                    if !retryable {
                        error!(status = %status, "Mail provider rejected the message");
                        return Err(InfrastructureError::Mail(format!(
                            "Provider rejected message with status {}",
                            status
                        )));
                    }
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send mail after {} attempts (last status {})",
                            attempts, status
                        )));
                    }
                    warn!(status = %status, delay = ?delay, "Transient provider error, backing off");
                }
                Err(e) => {
                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send mail after {} attempts: {}",
                            attempts, e
                        )));
                    }
                    warn!(error = %e, delay = ?delay, "Request error, backing off");
                }
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl MailService for HttpApiMailer {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        self.send_with_retry(to, subject, body).await
    }

    fn provider_name(&self) -> &str {
        "http-api"
    }
}
