//! Account repository trait defining the interface for account persistence.
//!
//! Implementations handle the actual storage operations while keeping the
//! boundary between domain and infrastructure layers. The store enforces
//! unique indexes on handle and email, so create/update are the final word
//! on uniqueness even under concurrent writers: flow-level duplicate
//! checks are advisory, the index is authoritative.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by email. The lookup is case-insensitive; callers
    /// may pass the address in any casing.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its exact handle
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, DomainError>;

    /// Insert a new account.
    ///
    /// Fails with `AuthError::DuplicateActive` if the unique index on
    /// handle or email rejects the row.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account.
    ///
    /// Fails with `AuthError::DuplicateActive` on a unique-index clash
    /// (an update can move an account onto a taken email).
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Delete an account. Returns false if no such account existed.
    /// The store cascades the member's recipes and groups.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
