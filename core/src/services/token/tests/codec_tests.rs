//! Unit tests for token issue/verify

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::services::token::{TokenCodec, TokenCodecConfig};
use crate::errors::{DomainError, TokenError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Payload {
    name: String,
    count: u32,
}

fn codec() -> TokenCodec {
    TokenCodec::new(&TokenCodecConfig::default())
}

fn payload() -> Payload {
    Payload {
        name: "ana".to_string(),
        count: 7,
    }
}

#[test]
fn test_issue_verify_round_trip() {
    let codec = codec();
    let token = codec.issue(payload(), Duration::minutes(15)).unwrap();

    let decoded: Payload = codec.verify(&token).unwrap();
    assert_eq!(decoded, payload());
}

#[test]
fn test_expired_token_is_rejected() {
    let codec = codec();
    let token = codec.issue(payload(), Duration::minutes(-1)).unwrap();

    let err = codec.verify::<Payload>(&token).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenExpired)
    ));
}

#[test]
fn test_verify_ignore_expiry_reads_expired_token() {
    let codec = codec();
    let token = codec.issue(payload(), Duration::minutes(-1)).unwrap();

    let decoded: Payload = codec.verify_ignore_expiry(&token).unwrap();
    assert_eq!(decoded, payload());
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let codec = codec();
    let other = TokenCodec::new(&TokenCodecConfig {
        secret: "a-completely-different-secret".to_string(),
        ..TokenCodecConfig::default()
    });
    let token = other.issue(payload(), Duration::minutes(15)).unwrap();

    let err = codec.verify::<Payload>(&token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[test]
fn test_wrong_secret_fails_even_ignoring_expiry() {
    let codec = codec();
    let other = TokenCodec::new(&TokenCodecConfig {
        secret: "a-completely-different-secret".to_string(),
        ..TokenCodecConfig::default()
    });
    let token = other.issue(payload(), Duration::minutes(-1)).unwrap();

    assert!(codec.verify_ignore_expiry::<Payload>(&token).is_err());
}

#[test]
fn test_malformed_token_is_rejected() {
    let codec = codec();
    for garbage in ["", "not-a-token", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
        let err = codec.verify::<Payload>(garbage).unwrap_err();
        assert!(
            matches!(err, DomainError::Token(TokenError::InvalidToken)),
            "expected InvalidToken for {:?}",
            garbage
        );
    }
}

#[test]
fn test_payload_of_wrong_shape_is_rejected() {
    #[derive(Serialize)]
    struct Other {
        something: bool,
    }

    let codec = codec();
    let token = codec
        .issue(Other { something: true }, Duration::minutes(15))
        .unwrap();

    assert!(codec.verify::<Payload>(&token).is_err());
}

#[test]
fn test_tampered_token_is_rejected() {
    let codec = codec();
    let token = codec.issue(payload(), Duration::minutes(15)).unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    assert!(codec.verify::<Payload>(&tampered).is_err());
}
