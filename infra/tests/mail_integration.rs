//! Wires the infrastructure mail adapter into the core registration
//! flow to prove the seams line up.

use std::sync::Arc;

use sav_core::repositories::MockAccountRepository;
use sav_core::services::mail::MailServiceTrait;
use sav_core::services::registration::{RegistrationConfig, RegistrationService};
use sav_core::services::session::{SessionConfig, SessionService};
use sav_core::services::token::{TokenCodec, TokenCodecConfig};

use sav_infra::mail::{MailServiceAdapter, MockMailService};

#[tokio::test]
async fn registration_flow_over_the_infra_mail_adapter() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let repository = Arc::new(MockAccountRepository::new());
    let mail = Arc::new(MailServiceAdapter::new(MockMailService::new()));
    let codec = Arc::new(TokenCodec::new(&TokenCodecConfig::default()));
    let sessions = Arc::new(SessionService::new(
        repository.clone(),
        codec.clone(),
        SessionConfig::default(),
    ));
    let registration = RegistrationService::new(
        repository.clone(),
        mail.clone(),
        codec,
        sessions,
        RegistrationConfig::default(),
    );

    let submitted = registration
        .submit("ana", "ana@example.com", "secret1")
        .await
        .unwrap();
    assert!(!submitted.intent_token.is_empty());
    assert!(submitted.message_id.starts_with("mock_"));
    assert_eq!(mail.inner().message_count(), 1);
}

#[tokio::test]
async fn failing_provider_surfaces_as_mail_delivery_failure() {
    let repository = Arc::new(MockAccountRepository::new());
    let mail = Arc::new(MailServiceAdapter::new(MockMailService::with_failures()));
    let codec = Arc::new(TokenCodec::new(&TokenCodecConfig::default()));
    let sessions = Arc::new(SessionService::new(
        repository.clone(),
        codec.clone(),
        SessionConfig::default(),
    ));
    let registration = RegistrationService::new(
        repository.clone(),
        mail.clone(),
        codec,
        sessions,
        RegistrationConfig::default(),
    );

    let err = registration
        .submit("ana", "ana@example.com", "secret1")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "MAIL_DELIVERY_FAILED");
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn adapter_formats_the_standard_messages() {
    let adapter = MailServiceAdapter::new(MockMailService::new());

    adapter
        .send_reset_code("ana@example.com", "123456")
        .await
        .unwrap();
    adapter
        .send_email_change_code("ana@example.com", "654321")
        .await
        .unwrap();
    assert_eq!(adapter.inner().message_count(), 2);
}
