//! Duplicate-resolution policy for handles and email addresses.
//!
//! Uniqueness on the platform holds among verified accounts only. An
//! unverified "ghost" row (legacy data from the era when registrations
//! were persisted before confirmation) must never block a verified
//! registration; it is superseded instead. The handle and the email may
//! collide with two different ghost rows at once.
//!
//! These checks are advisory reads. The store's unique indexes remain
//! authoritative under concurrency: two racing confirmations can both
//! pass the policy check, but only one create will win.

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;

/// Outcome of a duplicate check
#[derive(Debug, Default)]
pub struct IdentityCheck {
    /// Field owned by a verified account ("email" or "handle"), if any.
    /// A blocked identity must fail the operation with `DuplicateActive`.
    pub blocked: Option<String>,

    /// Unverified rows colliding with the identity, to be superseded
    /// before a verified account claims it
    pub ghosts: Vec<Account>,
}

impl IdentityCheck {
    /// Turn a blocked check into the flow error
    pub fn ensure_available(&self) -> DomainResult<()> {
        match &self.blocked {
            Some(field) => Err(AuthError::DuplicateActive {
                field: field.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Check whether a handle/email pair is available.
///
/// `exclude` skips the caller's own row, for operations on an existing
/// account. The email is matched case-insensitively; the handle exactly.
/// Email is checked first so a double collision reports the email, which
/// is what the registering user typed most deliberately.
pub async fn check_identity<A: AccountRepository>(
    repository: &A,
    handle: &str,
    email: &str,
    exclude: Option<Uuid>,
) -> DomainResult<IdentityCheck> {
    let mut check = IdentityCheck::default();

    if let Some(existing) = repository.find_by_email(email).await? {
        if exclude != Some(existing.id) {
            if existing.is_verified {
                check.blocked = Some("email".to_string());
                return Ok(check);
            }
            check.ghosts.push(existing);
        }
    }

    if let Some(existing) = repository.find_by_handle(handle).await? {
        if exclude != Some(existing.id) && !check.ghosts.iter().any(|g| g.id == existing.id) {
            if existing.is_verified {
                check.blocked = Some("handle".to_string());
                return Ok(check);
            }
            check.ghosts.push(existing);
        }
    }

    Ok(check)
}

/// Delete ghost rows so a verified account can claim their identity.
pub async fn supersede_ghosts<A: AccountRepository>(
    repository: &A,
    ghosts: &[Account],
) -> DomainResult<()> {
    for ghost in ghosts {
        tracing::info!(
            account_id = %ghost.id,
            handle = %ghost.handle,
            event = "ghost_superseded",
            "Removing unverified account superseded by a verified registration"
        );
        repository.delete(ghost.id).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockAccountRepository;

    fn account(handle: &str, email: &str, verified: bool) -> Account {
        let mut account = Account::new(
            handle.to_string(),
            email.to_string(),
            "$2b$12$hash".to_string(),
        );
        if verified {
            account.verify();
        }
        account
    }

    #[tokio::test]
    async fn test_free_identity_is_available() {
        let repo = MockAccountRepository::new();
        let check = check_identity(&repo, "ana", "a@x.com", None).await.unwrap();
        assert!(check.blocked.is_none());
        assert!(check.ghosts.is_empty());
        assert!(check.ensure_available().is_ok());
    }

    #[tokio::test]
    async fn test_verified_email_blocks() {
        let repo =
            MockAccountRepository::with_accounts(vec![account("ana", "a@x.com", true)]).await;

        let check = check_identity(&repo, "bea", "A@X.com", None).await.unwrap();
        assert_eq!(check.blocked.as_deref(), Some("email"));
        assert!(check.ensure_available().is_err());
    }

    #[tokio::test]
    async fn test_verified_handle_blocks() {
        let repo =
            MockAccountRepository::with_accounts(vec![account("ana", "a@x.com", true)]).await;

        let check = check_identity(&repo, "ana", "b@x.com", None).await.unwrap();
        assert_eq!(check.blocked.as_deref(), Some("handle"));
    }

    #[tokio::test]
    async fn test_ghost_does_not_block() {
        let repo =
            MockAccountRepository::with_accounts(vec![account("ana", "a@x.com", false)]).await;

        let check = check_identity(&repo, "ana", "a@x.com", None).await.unwrap();
        assert!(check.blocked.is_none());
        assert_eq!(check.ghosts.len(), 1);
    }

    #[tokio::test]
    async fn test_handle_and_email_may_hit_two_ghosts() {
        let repo = MockAccountRepository::with_accounts(vec![
            account("ana", "other@x.com", false),
            account("other", "a@x.com", false),
        ])
        .await;

        let check = check_identity(&repo, "ana", "a@x.com", None).await.unwrap();
        assert!(check.blocked.is_none());
        assert_eq!(check.ghosts.len(), 2);
    }

    #[tokio::test]
    async fn test_single_ghost_holding_both_is_reported_once() {
        let repo =
            MockAccountRepository::with_accounts(vec![account("ana", "a@x.com", false)]).await;

        let check = check_identity(&repo, "ana", "a@x.com", None).await.unwrap();
        assert_eq!(check.ghosts.len(), 1);
    }

    #[tokio::test]
    async fn test_exclude_skips_own_row() {
        let own = account("ana", "a@x.com", true);
        let own_id = own.id;
        let repo = MockAccountRepository::with_accounts(vec![own]).await;

        let check = check_identity(&repo, "ana", "a@x.com", Some(own_id))
            .await
            .unwrap();
        assert!(check.blocked.is_none());
        assert!(check.ghosts.is_empty());
    }

    #[tokio::test]
    async fn test_supersede_deletes_ghosts() {
        let ghost = account("ana", "a@x.com", false);
        let repo = MockAccountRepository::with_accounts(vec![ghost]).await;

        let check = check_identity(&repo, "ana", "a@x.com", None).await.unwrap();
        supersede_ghosts(&repo, &check.ghosts).await.unwrap();
        assert!(repo.is_empty().await);
    }
}
