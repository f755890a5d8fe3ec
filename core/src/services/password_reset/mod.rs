//! Credential reset flow: request, verify, complete
//!
//! The reset intent lives on the account row as a code/expiry pair. At
//! most one is active; a new request overwrites the previous one. Codes
//! are matched against the account that owns the email, never by a
//! store-wide code scan.

mod service;

#[cfg(test)]
mod tests;

pub use service::PasswordResetService;
