//! MySQL implementation of the AccountRepository trait.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE accounts (
//!     id                      CHAR(36)     PRIMARY KEY,
//!     handle                  VARCHAR(30)  NOT NULL,
//!     email                   VARCHAR(254) NOT NULL,
//!     password_hash           VARCHAR(100) NOT NULL,
//!     is_verified             BOOLEAN      NOT NULL DEFAULT FALSE,
//!     reset_code              VARCHAR(6)   NULL,
//!     reset_expires_at        TIMESTAMP(6) NULL,
//!     pending_email           VARCHAR(254) NULL,
//!     email_change_code       VARCHAR(6)   NULL,
//!     email_change_expires_at TIMESTAMP(6) NULL,
//!     created_at              TIMESTAMP(6) NOT NULL,
//!     updated_at              TIMESTAMP(6) NOT NULL,
//!     UNIQUE KEY uq_accounts_handle (handle),
//!     UNIQUE KEY uq_accounts_email (email)
//! );
//! ```
//!
//! The unique keys are what makes confirmation races safe: two intents
//! for the same handle can both pass the policy read, but only one
//! insert survives. The loser surfaces as `DuplicateActive`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sav_core::domain::entities::account::Account;
use sav_core::errors::{AuthError, DomainError};
use sav_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::column_error("id", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID in accounts.id: {}", e),
            })?,
            handle: row
                .try_get("handle")
                .map_err(|e| Self::column_error("handle", e))?,
            email: row
                .try_get("email")
                .map_err(|e| Self::column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| Self::column_error("password_hash", e))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| Self::column_error("is_verified", e))?,
            reset_code: row
                .try_get("reset_code")
                .map_err(|e| Self::column_error("reset_code", e))?,
            reset_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_expires_at")
                .map_err(|e| Self::column_error("reset_expires_at", e))?,
            pending_email: row
                .try_get("pending_email")
                .map_err(|e| Self::column_error("pending_email", e))?,
            email_change_code: row
                .try_get("email_change_code")
                .map_err(|e| Self::column_error("email_change_code", e))?,
            email_change_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_change_expires_at")
                .map_err(|e| Self::column_error("email_change_expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::column_error("updated_at", e))?,
        })
    }

    fn column_error(column: &str, e: sqlx::Error) -> DomainError {
        DomainError::Database {
            message: format!("Failed to get {}: {}", column, e),
        }
    }

    /// Map a write error, translating unique-key violations into the
    /// duplicate-resolution failure the flows expect.
    fn map_write_error(e: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db_err) = &e {
            // SQLSTATE 23000: integrity constraint violation (MySQL 1062)
            if db_err.code().as_deref() == Some("23000") {
                let field = if db_err.message().contains("uq_accounts_email") {
                    "email"
                } else {
                    "handle"
                };
                return AuthError::DuplicateActive {
                    field: field.to_string(),
                }
                .into();
            }
        }
        DomainError::Database {
            message: format!("Database write failed: {}", e),
        }
    }

    const SELECT_COLUMNS: &'static str = r#"
        SELECT id, handle, email, password_hash, is_verified,
               reset_code, reset_expires_at,
               pending_email, email_change_code, email_change_expires_at,
               created_at, updated_at
        FROM accounts
    "#;
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", Self::SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        result.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        // Stored addresses are lowercased; folding the input makes the
        // lookup case-insensitive regardless of column collation.
        let folded = email.trim().to_lowercase();
        let query = format!("{} WHERE email = ? LIMIT 1", Self::SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(folded)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        result.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE handle = ? LIMIT 1", Self::SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        result.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, handle, email, password_hash, is_verified,
                reset_code, reset_expires_at,
                pending_email, email_change_code, email_change_expires_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.handle)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.is_verified)
            .bind(&account.reset_code)
            .bind(account.reset_expires_at)
            .bind(&account.pending_email)
            .bind(&account.email_change_code)
            .bind(account.email_change_expires_at)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(Self::map_write_error)?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                handle = ?,
                email = ?,
                password_hash = ?,
                is_verified = ?,
                reset_code = ?,
                reset_expires_at = ?,
                pending_email = ?,
                email_change_code = ?,
                email_change_expires_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let mut updated = account;
        updated.updated_at = Utc::now();

        let result = sqlx::query(query)
            .bind(&updated.handle)
            .bind(&updated.email)
            .bind(&updated.password_hash)
            .bind(updated.is_verified)
            .bind(&updated.reset_code)
            .bind(updated.reset_expires_at)
            .bind(&updated.pending_email)
            .bind(&updated.email_change_code)
            .bind(updated.email_change_expires_at)
            .bind(updated.updated_at)
            .bind(updated.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Database {
                message: "Account not found for update".to_string(),
            });
        }

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete account: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
