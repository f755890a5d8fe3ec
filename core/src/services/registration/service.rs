//! Registration flow implementation

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::account::Account;
use crate::domain::entities::registration::RegistrationIntent;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::AccountRepository;
use crate::services::duplicates::{check_identity, supersede_ghosts};
use crate::services::mail::MailServiceTrait;
use crate::services::password::{hash_password, validate_password};
use crate::services::session::SessionService;
use crate::services::token::TokenCodec;
use crate::services::verification_code::{codes_match, generate_code};

use sav_shared::utils::validation::{is_valid_handle, mask_email, normalize_email};

use super::config::RegistrationConfig;

/// Result of a registration submission or resend
#[derive(Debug, Clone)]
pub struct RegistrationSubmitted {
    /// Signed intent token the client must present at confirmation
    pub intent_token: String,
    /// Provider message id of the confirmation email
    pub message_id: String,
}

/// Orchestrates the pending-registration to confirmed-account transition.
pub struct RegistrationService<A: AccountRepository, M: MailServiceTrait> {
    repository: Arc<A>,
    mail_service: Arc<M>,
    codec: Arc<TokenCodec>,
    sessions: Arc<SessionService<A>>,
    config: RegistrationConfig,
}

impl<A, M> RegistrationService<A, M>
where
    A: AccountRepository,
    M: MailServiceTrait,
{
    pub fn new(
        repository: Arc<A>,
        mail_service: Arc<M>,
        codec: Arc<TokenCodec>,
        sessions: Arc<SessionService<A>>,
        config: RegistrationConfig,
    ) -> Self {
        Self {
            repository,
            mail_service,
            codec,
            sessions,
            config,
        }
    }

    /// Submit a registration.
    ///
    /// Validates the identity fields, refuses handles/emails owned by a
    /// verified account, hashes the password, and hands back a signed
    /// intent token while the confirmation code goes out by email.
    /// Exactly one notifier call is made per submission; if delivery
    /// fails the caller gets no token.
    pub async fn submit(
        &self,
        handle: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<RegistrationSubmitted> {
        if !is_valid_handle(handle) {
            return Err(DomainError::Validation {
                message: format!("Invalid handle: {}", handle),
            });
        }
        if !self.mail_service.is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        validate_password(password)?;

        let email = normalize_email(email);

        check_identity(self.repository.as_ref(), handle, &email, None)
            .await?
            .ensure_available()?;

        let password_hash = hash_password(password)?;
        let intent = RegistrationIntent::new(
            handle.to_string(),
            email,
            password_hash,
            generate_code(),
        );

        let intent_token = self
            .codec
            .issue(intent.clone(), Duration::minutes(self.config.intent_ttl_minutes))?;

        let message_id = self
            .mail_service
            .send_confirmation_code(&intent.email, &intent.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&intent.email),
                    error = %e,
                    event = "confirmation_mail_failed",
                    "Failed to deliver registration confirmation code"
                );
                AuthError::MailDeliveryFailed
            })?;

        tracing::info!(
            email = %mask_email(&intent.email),
            handle = %intent.handle,
            event = "registration_submitted",
            "Issued registration intent and dispatched confirmation code"
        );

        Ok(RegistrationSubmitted {
            intent_token,
            message_id,
        })
    }

    /// Confirm a registration, materializing the account.
    ///
    /// The duplicate check runs again here: intents are long-lived
    /// relative to write traffic, so another verified account may have
    /// claimed the handle or email since submission. Ghost rows found
    /// holding the identity are superseded before the insert; the store's
    /// unique indexes settle any race between two confirmations.
    pub async fn confirm(&self, intent_token: &str, code: &str) -> DomainResult<AuthResponse> {
        let intent: RegistrationIntent =
            self.codec.verify(intent_token).map_err(|e| match e {
                DomainError::Token(TokenError::TokenExpired) => AuthError::IntentExpired.into(),
                other => other,
            })?;

        if !codes_match(&intent.code, code) {
            tracing::warn!(
                email = %mask_email(&intent.email),
                event = "confirmation_code_mismatch",
                "Registration confirmation attempted with a wrong code"
            );
            return Err(AuthError::CodeMismatch.into());
        }

        let identity =
            check_identity(self.repository.as_ref(), &intent.handle, &intent.email, None).await?;
        identity.ensure_available()?;
        supersede_ghosts(self.repository.as_ref(), &identity.ghosts).await?;

        let mut account = Account::new(intent.handle, intent.email, intent.password_hash);
        account.verify();
        let account = self.repository.create(account).await?;

        let session_token = self.sessions.issue(account.id)?;

        tracing::info!(
            account_id = %account.id,
            handle = %account.handle,
            event = "registration_confirmed",
            "Account materialized as verified"
        );

        Ok(AuthResponse::new(&account, session_token))
    }

    /// Re-issue an intent with a fresh confirmation code.
    ///
    /// The token is decoded ignoring expiry so an expired registration
    /// can still be resent. Handle, email and password hash are carried
    /// over untouched; only code and expiry change.
    pub async fn resend(&self, intent_token: &str) -> DomainResult<RegistrationSubmitted> {
        let mut intent: RegistrationIntent = self.codec.verify_ignore_expiry(intent_token)?;

        intent.regenerate(generate_code());

        let intent_token = self
            .codec
            .issue(intent.clone(), Duration::minutes(self.config.intent_ttl_minutes))?;

        let message_id = self
            .mail_service
            .send_confirmation_code(&intent.email, &intent.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&intent.email),
                    error = %e,
                    event = "confirmation_mail_failed",
                    "Failed to deliver resent confirmation code"
                );
                AuthError::MailDeliveryFailed
            })?;

        tracing::info!(
            email = %mask_email(&intent.email),
            event = "registration_resent",
            "Re-issued registration intent with a fresh code"
        );

        Ok(RegistrationSubmitted {
            intent_token,
            message_id,
        })
    }
}
