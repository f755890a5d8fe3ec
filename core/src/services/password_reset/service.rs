//! Password reset flow implementation

use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::mail::MailServiceTrait;
use crate::services::password::{hash_password, validate_password};
use crate::services::session::SessionService;
use crate::services::verification_code::{codes_match, generate_code};

use sav_shared::utils::validation::mask_email;

/// Orchestrates the reset-requested to password-changed transition.
pub struct PasswordResetService<A: AccountRepository, M: MailServiceTrait> {
    repository: Arc<A>,
    mail_service: Arc<M>,
    sessions: Arc<SessionService<A>>,
}

impl<A, M> PasswordResetService<A, M>
where
    A: AccountRepository,
    M: MailServiceTrait,
{
    pub fn new(
        repository: Arc<A>,
        mail_service: Arc<M>,
        sessions: Arc<SessionService<A>>,
    ) -> Self {
        Self {
            repository,
            mail_service,
            sessions,
        }
    }

    /// Request a password reset code for an account.
    ///
    /// Fails with `NotFound` for an unknown email before any notifier
    /// call. If the notifier fails after the code was persisted, the
    /// code/expiry pair is rolled back to unset: a user must never be
    /// left holding a code that failed to send.
    pub async fn request_reset(&self, email: &str) -> DomainResult<()> {
        let mut account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;

        let code = generate_code();
        account.set_reset_code(code.clone());
        let account = self.repository.update(account).await?;

        if let Err(e) = self.mail_service.send_reset_code(&account.email, &code).await {
            tracing::error!(
                email = %mask_email(&account.email),
                error = %e,
                event = "reset_mail_failed",
                "Failed to deliver reset code, rolling back"
            );
            let mut rollback = account;
            rollback.clear_reset_code();
            if let Err(store_err) = self.repository.update(rollback).await {
                tracing::error!(
                    error = %store_err,
                    event = "reset_rollback_failed",
                    "Could not roll back undelivered reset code"
                );
            }
            return Err(AuthError::MailDeliveryFailed.into());
        }

        tracing::info!(
            account_id = %account.id,
            event = "reset_requested",
            "Issued password reset code"
        );
        Ok(())
    }

    /// Check a reset code without consuming it.
    ///
    /// Pure read, idempotent: the client may call this any number of
    /// times while the code is valid (typically to gate the new-password
    /// form before submission).
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<()> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::CodeInvalidOrExpired)?;

        if !Self::reset_code_valid(&account, code) {
            return Err(AuthError::CodeInvalidOrExpired.into());
        }
        Ok(())
    }

    /// Complete the reset: set a new password and consume the code.
    pub async fn complete_reset(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<AuthResponse> {
        let mut account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::CodeInvalidOrExpired)?;

        if !Self::reset_code_valid(&account, code) {
            return Err(AuthError::CodeInvalidOrExpired.into());
        }

        validate_password(new_password)?;
        account.set_password_hash(hash_password(new_password)?);
        account.clear_reset_code();
        let account = self.repository.update(account).await?;

        let session_token = self.sessions.issue(account.id)?;

        tracing::info!(
            account_id = %account.id,
            event = "reset_completed",
            "Password changed via reset code"
        );
        Ok(AuthResponse::new(&account, session_token))
    }

    /// A code is valid only against the account that owns the email:
    /// present, unexpired, and matching in constant time.
    fn reset_code_valid(account: &Account, code: &str) -> bool {
        account.has_active_reset_code()
            && account
                .reset_code
                .as_deref()
                .map(|stored| codes_match(stored, code))
                .unwrap_or(false)
    }
}
