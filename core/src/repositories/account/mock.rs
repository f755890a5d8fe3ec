//! In-memory implementation of AccountRepository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

/// In-memory account repository.
///
/// Mirrors the store's unique-index semantics: duplicate checks happen
/// under the same write lock as the insert, so two concurrent writers
/// cannot both claim a handle or email.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository pre-seeded with accounts
    pub async fn with_accounts(accounts: Vec<Account>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.accounts.write().await;
            for account in accounts {
                map.insert(account.id, account);
            }
        }
        repo
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn duplicate_of(map: &HashMap<Uuid, Account>, account: &Account) -> Option<String> {
        for existing in map.values() {
            if existing.id == account.id {
                continue;
            }
            if existing.email == account.email {
                return Some("email".to_string());
            }
            if existing.handle == account.handle {
                return Some("handle".to_string());
            }
        }
        None
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let folded = email.trim().to_lowercase();
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == folded).cloned())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.handle == handle).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if let Some(field) = Self::duplicate_of(&accounts, &account) {
            return Err(AuthError::DuplicateActive { field }.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::Database {
                message: "account not found".to_string(),
            });
        }
        if let Some(field) = Self::duplicate_of(&accounts, &account) {
            return Err(AuthError::DuplicateActive { field }.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(&id).is_some())
    }
}
