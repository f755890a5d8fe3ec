//! Registration flow: submit, confirm, resend
//!
//! Registrations are token-carried intents. Nothing is persisted until
//! confirmation succeeds, so unconfirmed signups never leave ghost rows
//! in the account store and there is nothing to sweep up later.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::RegistrationConfig;
pub use service::{RegistrationService, RegistrationSubmitted};
