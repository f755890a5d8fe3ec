//! Email change flow implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::AccountSummary;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::mail::MailServiceTrait;
use crate::services::verification_code::{codes_match, generate_code};

use sav_shared::utils::validation::{mask_email, normalize_email};

/// Orchestrates the change-requested to change-verified transition for
/// an existing account's email address.
pub struct EmailChangeService<A: AccountRepository, M: MailServiceTrait> {
    repository: Arc<A>,
    mail_service: Arc<M>,
}

impl<A, M> EmailChangeService<A, M>
where
    A: AccountRepository,
    M: MailServiceTrait,
{
    pub fn new(repository: Arc<A>, mail_service: Arc<M>) -> Self {
        Self {
            repository,
            mail_service,
        }
    }

    /// Request a change to a new address.
    ///
    /// The code goes to the candidate address: whoever confirms must own
    /// the destination mailbox, not the current one.
    pub async fn request_change(&self, account_id: Uuid, new_email: &str) -> DomainResult<()> {
        let mut account = self.require_account(account_id).await?;

        if !self.mail_service.is_valid_email(new_email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        let candidate = normalize_email(new_email);

        if account.email == candidate {
            return Err(AuthError::SameEmail.into());
        }

        // Only a verified owner blocks; a ghost row is superseded at
        // verification time.
        if let Some(other) = self.repository.find_by_email(&candidate).await? {
            if other.id != account.id && other.is_verified {
                return Err(AuthError::EmailTaken.into());
            }
        }

        let code = generate_code();
        account.set_email_change(candidate.clone(), code.clone());
        let account = self.repository.update(account).await?;

        if let Err(e) = self
            .mail_service
            .send_email_change_code(&candidate, &code)
            .await
        {
            tracing::error!(
                email = %mask_email(&candidate),
                error = %e,
                event = "email_change_mail_failed",
                "Failed to deliver email change code, rolling back"
            );
            let mut rollback = account;
            rollback.clear_email_change();
            if let Err(store_err) = self.repository.update(rollback).await {
                tracing::error!(
                    error = %store_err,
                    event = "email_change_rollback_failed",
                    "Could not roll back undelivered email change code"
                );
            }
            return Err(AuthError::MailDeliveryFailed.into());
        }

        tracing::info!(
            account_id = %account.id,
            candidate = %mask_email(&candidate),
            event = "email_change_requested",
            "Issued email change code"
        );
        Ok(())
    }

    /// Verify the code and promote the candidate address.
    pub async fn verify_change(&self, account_id: Uuid, code: &str) -> DomainResult<AccountSummary> {
        let mut account = self.require_account(account_id).await?;

        if !Self::change_code_valid(&account, code) {
            return Err(AuthError::CodeInvalidOrExpired.into());
        }

        // The candidate may have been claimed while the code was in
        // flight; a verified owner wins, a ghost is superseded.
        let candidate = account
            .pending_email
            .clone()
            .ok_or(AuthError::CodeInvalidOrExpired)?;
        if let Some(other) = self.repository.find_by_email(&candidate).await? {
            if other.id != account.id {
                if other.is_verified {
                    return Err(AuthError::EmailTaken.into());
                }
                tracing::info!(
                    account_id = %other.id,
                    event = "ghost_superseded",
                    "Removing unverified account holding the candidate email"
                );
                self.repository.delete(other.id).await?;
            }
        }

        account.promote_pending_email();
        let account = self.repository.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "email_change_verified",
            "Account email updated"
        );
        Ok(AccountSummary::from(&account))
    }

    async fn require_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AuthError::Unauthorized.into())
    }

    fn change_code_valid(account: &Account, code: &str) -> bool {
        account.has_active_email_change()
            && account
                .email_change_code
                .as_deref()
                .map(|stored| codes_match(stored, code))
                .unwrap_or(false)
    }
}
