//! Account management implementation
//!
//! Operates on behalf of an authenticated account; the session gate has
//! already resolved the caller. Email edits are deliberately absent here:
//! an address only changes through the verified email change flow.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::AccountSummary;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::duplicates::{check_identity, supersede_ghosts};
use crate::services::password::{hash_password, validate_password, verify_password};

use sav_shared::utils::validation::is_valid_handle;

/// Profile and credential management for existing accounts.
pub struct AccountService<A: AccountRepository> {
    repository: Arc<A>,
}

impl<A: AccountRepository> AccountService<A> {
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Fetch the caller's profile
    pub async fn profile(&self, account_id: Uuid) -> DomainResult<AccountSummary> {
        let account = self.require_account(account_id).await?;
        Ok(AccountSummary::from(&account))
    }

    /// Change the caller's handle.
    pub async fn update_handle(
        &self,
        account_id: Uuid,
        new_handle: &str,
    ) -> DomainResult<AccountSummary> {
        let mut account = self.require_account(account_id).await?;

        if !is_valid_handle(new_handle) {
            return Err(DomainError::Validation {
                message: format!("Invalid handle: {}", new_handle),
            });
        }
        if account.handle == new_handle {
            return Ok(AccountSummary::from(&account));
        }

        let identity = check_identity(
            self.repository.as_ref(),
            new_handle,
            &account.email,
            Some(account.id),
        )
        .await?;
        identity.ensure_available()?;
        supersede_ghosts(self.repository.as_ref(), &identity.ghosts).await?;

        account.handle = new_handle.to_string();
        let account = self.repository.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            handle = %account.handle,
            event = "handle_updated",
            "Account handle changed"
        );
        Ok(AccountSummary::from(&account))
    }

    /// Change the caller's password, verifying the old one first.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut account = self.require_account(account_id).await?;

        if !verify_password(old_password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }
        validate_password(new_password)?;

        account.set_password_hash(hash_password(new_password)?);
        self.repository.update(account).await?;

        tracing::info!(
            account_id = %account_id,
            event = "password_changed",
            "Password changed by the account owner"
        );
        Ok(())
    }

    /// Delete the caller's account.
    ///
    /// The store cascades recipes and groups; outstanding session tokens
    /// die at the next `authenticate` lookup.
    pub async fn delete_account(&self, account_id: Uuid) -> DomainResult<()> {
        if !self.repository.delete(account_id).await? {
            return Err(AuthError::NotFound.into());
        }
        tracing::info!(
            account_id = %account_id,
            event = "account_deleted",
            "Account removed"
        );
        Ok(())
    }

    async fn require_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AuthError::NotFound.into())
    }
}
