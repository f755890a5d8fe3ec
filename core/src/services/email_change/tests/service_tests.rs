//! Unit tests for the email change flow

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{AccountRepository, MockAccountRepository};
use crate::services::email_change::EmailChangeService;

use super::mocks::MockMailService;

struct Harness {
    repository: Arc<MockAccountRepository>,
    mail: Arc<MockMailService>,
    service: EmailChangeService<MockAccountRepository, MockMailService>,
}

fn harness_with(mail: MockMailService) -> Harness {
    let repository = Arc::new(MockAccountRepository::new());
    let mail = Arc::new(mail);
    let service = EmailChangeService::new(repository.clone(), mail.clone());
    Harness {
        repository,
        mail,
        service,
    }
}

fn harness() -> Harness {
    harness_with(MockMailService::new())
}

async fn seed(repository: &MockAccountRepository, handle: &str, email: &str, verified: bool) -> Account {
    let mut account = Account::new(
        handle.to_string(),
        email.to_string(),
        "$2b$12$unused-hash".to_string(),
    );
    if verified {
        account.verify();
    }
    repository.create(account.clone()).await.unwrap();
    account
}

async fn change_code(repository: &MockAccountRepository, id: Uuid) -> String {
    repository
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .email_change_code
        .unwrap()
}

#[tokio::test]
async fn test_request_same_email_is_rejected() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;

    let err = h
        .service
        .request_change(account.id, "A@X.COM")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SameEmail)));
    assert_eq!(h.mail.sent_count(), 0);
}

#[tokio::test]
async fn test_request_taken_email_issues_nothing() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;
    seed(&h.repository, "bea", "b@x.com", true).await;

    let err = h
        .service
        .request_change(account.id, "b@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailTaken)));
    assert_eq!(h.mail.sent_count(), 0);

    let stored = h.repository.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.email_change_code.is_none());
}

#[tokio::test]
async fn test_request_email_held_by_ghost_is_allowed() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;
    seed(&h.repository, "ghost", "new@x.com", false).await;

    assert!(h.service.request_change(account.id, "new@x.com").await.is_ok());
}

#[tokio::test]
async fn test_request_sends_code_to_candidate_address() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;

    h.service
        .request_change(account.id, "New@X.com")
        .await
        .unwrap();

    let stored = h.repository.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.pending_email.as_deref(), Some("new@x.com"));
    assert!(stored.has_active_email_change());
    // Current address unchanged until verification
    assert_eq!(stored.email, "a@x.com");
    assert_eq!(h.mail.last_recipient().as_deref(), Some("new@x.com"));
}

#[tokio::test]
async fn test_request_rolls_back_when_mail_fails() {
    let h = harness_with(MockMailService::failing());
    let account = seed(&h.repository, "ana", "a@x.com", true).await;

    let err = h
        .service
        .request_change(account.id, "new@x.com")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::MailDeliveryFailed)
    ));

    let stored = h.repository.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.pending_email.is_none());
    assert!(stored.email_change_code.is_none());
}

#[tokio::test]
async fn test_request_for_missing_account_is_unauthorized() {
    let h = harness();
    let err = h
        .service
        .request_change(Uuid::new_v4(), "new@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::Unauthorized)));
}

#[tokio::test]
async fn test_verify_wrong_code() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;
    h.service
        .request_change(account.id, "new@x.com")
        .await
        .unwrap();
    let code = change_code(&h.repository, account.id).await;
    let wrong = if code == "999999" { "111111" } else { "999999" };

    let err = h.service.verify_change(account.id, wrong).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::CodeInvalidOrExpired)
    ));

    // The address was not promoted
    let stored = h.repository.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "a@x.com");
}

#[tokio::test]
async fn test_verify_expired_code() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;
    h.service
        .request_change(account.id, "new@x.com")
        .await
        .unwrap();
    let code = change_code(&h.repository, account.id).await;

    let mut stored = h.repository.find_by_id(account.id).await.unwrap().unwrap();
    stored.email_change_expires_at = Some(Utc::now() - Duration::seconds(1));
    h.repository.update(stored).await.unwrap();

    let err = h.service.verify_change(account.id, &code).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::CodeInvalidOrExpired)
    ));
}

#[tokio::test]
async fn test_verify_promotes_candidate() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;
    h.service
        .request_change(account.id, "new@x.com")
        .await
        .unwrap();
    let code = change_code(&h.repository, account.id).await;

    let summary = h.service.verify_change(account.id, &code).await.unwrap();
    assert_eq!(summary.email, "new@x.com");

    let stored = h.repository.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "new@x.com");
    assert!(stored.pending_email.is_none());
    assert!(stored.email_change_code.is_none());
    assert!(h
        .repository
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_verify_loses_race_to_verified_claimant() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;
    h.service
        .request_change(account.id, "new@x.com")
        .await
        .unwrap();
    let code = change_code(&h.repository, account.id).await;

    // A verified account claims the candidate while the code is in flight
    seed(&h.repository, "claimant", "new@x.com", true).await;

    let err = h.service.verify_change(account.id, &code).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailTaken)));
}

#[tokio::test]
async fn test_verify_supersedes_ghost_on_candidate() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;
    h.service
        .request_change(account.id, "new@x.com")
        .await
        .unwrap();
    let code = change_code(&h.repository, account.id).await;

    let ghost = seed(&h.repository, "ghost", "new@x.com", false).await;

    let summary = h.service.verify_change(account.id, &code).await.unwrap();
    assert_eq!(summary.email, "new@x.com");
    assert!(h.repository.find_by_id(ghost.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_verify_without_request() {
    let h = harness();
    let account = seed(&h.repository, "ana", "a@x.com", true).await;

    let err = h
        .service
        .verify_change(account.id, "123456")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::CodeInvalidOrExpired)
    ));
}
