//! Validation helpers for user-supplied identity fields

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum handle length
pub const HANDLE_MIN_LENGTH: usize = 3;

/// Maximum handle length
pub const HANDLE_MAX_LENGTH: usize = 30;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

static HANDLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._\-]*$").expect("handle regex must compile")
});

/// Check whether a string looks like a deliverable email address.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Normalize an email address for storage and comparison.
///
/// Addresses are compared case-insensitively throughout the platform,
/// so they are trimmed and lowercased before they ever reach the store.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check whether a handle is acceptable: 3-30 characters, starting with
/// a letter or digit, containing only letters, digits, `.`, `_` or `-`.
pub fn is_valid_handle(handle: &str) -> bool {
    handle.len() >= HANDLE_MIN_LENGTH
        && handle.len() <= HANDLE_MAX_LENGTH
        && HANDLE_REGEX.is_match(handle)
}

/// Mask an email address for logging.
///
/// Keeps the first character of the local part and the full domain:
/// `ana@example.com` becomes `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
