//! Signed token issue/verify implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, TokenError};

use super::config::TokenCodecConfig;

/// Standard claims wrapped around every payload
#[derive(Debug, Serialize, Deserialize)]
struct ClaimsEnvelope<T> {
    /// Issued-at timestamp
    iat: i64,
    /// Expiration timestamp
    exp: i64,
    /// Issuer
    iss: String,
    /// Caller-supplied payload, flattened into the claim set
    #[serde(flatten)]
    payload: T,
}

/// Codec for signed, time-limited, tamper-proof tokens.
///
/// Symmetric HS256 with one process-wide secret. Callers treat tokens as
/// opaque strings; the payload is any serde map of field name to value.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validation_ignore_expiry: Validation,
    issuer: String,
}

impl TokenCodec {
    /// Create a codec from configuration
    pub fn new(config: &TokenCodecConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let mut validation_ignore_expiry = validation.clone();
        validation_ignore_expiry.validate_exp = false;

        Self {
            encoding_key,
            decoding_key,
            validation,
            validation_ignore_expiry,
            issuer: config.issuer.clone(),
        }
    }

    /// Issue a signed token carrying `payload`, valid for `ttl`.
    pub fn issue<T: Serialize>(&self, payload: T, ttl: Duration) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = ClaimsEnvelope {
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.issuer.clone(),
            payload,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verify a token and decode its payload.
    ///
    /// Fails with `TokenError::TokenExpired` past the encoded expiry, and
    /// `TokenError::InvalidToken` for a bad signature, malformed structure,
    /// wrong issuer, or a payload that does not deserialize as `T`.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, DomainError> {
        self.decode_with(token, &self.validation)
    }

    /// Verify a token but accept an expired one.
    ///
    /// Used exclusively by the registration resend flow, so an expired
    /// intent can still be read for re-issuance. Signature and issuer
    /// checks still apply.
    pub fn verify_ignore_expiry<T: DeserializeOwned>(&self, token: &str) -> Result<T, DomainError> {
        self.decode_with(token, &self.validation_ignore_expiry)
    }

    fn decode_with<T: DeserializeOwned>(
        &self,
        token: &str,
        validation: &Validation,
    ) -> Result<T, DomainError> {
        let data = decode::<ClaimsEnvelope<T>>(token, &self.decoding_key, validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                _ => DomainError::Token(TokenError::InvalidToken),
            },
        )?;

        Ok(data.claims.payload)
    }
}
