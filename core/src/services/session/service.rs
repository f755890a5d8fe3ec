//! Session issuer implementation

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::password::verify_password;
use crate::services::token::TokenCodec;

use super::config::SessionConfig;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject: the account id
    sub: String,
}

/// Issues bearer session tokens and validates them on inbound requests.
pub struct SessionService<A: AccountRepository> {
    repository: Arc<A>,
    codec: Arc<TokenCodec>,
    config: SessionConfig,
}

impl<A: AccountRepository> SessionService<A> {
    pub fn new(repository: Arc<A>, codec: Arc<TokenCodec>, config: SessionConfig) -> Self {
        Self {
            repository,
            codec,
            config,
        }
    }

    /// Issue a session token for an account.
    pub fn issue(&self, account_id: Uuid) -> DomainResult<String> {
        self.codec.issue(
            SessionClaims {
                sub: account_id.to_string(),
            },
            Duration::days(self.config.expiry_days),
        )
    }

    /// Validate a bearer token and resolve its account.
    ///
    /// Fails with `Unauthorized` when the token is malformed, expired, or
    /// its subject no longer exists. The store lookup happens on every
    /// call: deleting an account invalidates all of its outstanding
    /// tokens even though they remain cryptographically valid.
    pub async fn authenticate(&self, token: &str) -> DomainResult<Account> {
        let claims: SessionClaims = self
            .codec
            .verify(token)
            .map_err(|_| AuthError::Unauthorized)?;

        let account_id =
            Uuid::parse_str(&claims.sub).map_err(|_| AuthError::Unauthorized)?;

        match self.repository.find_by_id(account_id).await? {
            Some(account) => Ok(account),
            None => {
                tracing::warn!(
                    account_id = %account_id,
                    event = "session_subject_gone",
                    "Valid session token for an account that no longer exists"
                );
                Err(AuthError::Unauthorized.into())
            }
        }
    }

    /// Authenticate with email and password, issuing a fresh session.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.is_verified {
            return Err(AuthError::AccountNotVerified.into());
        }

        if !verify_password(password, &account.password_hash)? {
            tracing::warn!(
                account_id = %account.id,
                event = "login_failed",
                "Password mismatch on login"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.issue(account.id)?;
        tracing::info!(
            account_id = %account.id,
            event = "login_success",
            "Issued session token"
        );
        Ok(AuthResponse::new(&account, token))
    }
}
