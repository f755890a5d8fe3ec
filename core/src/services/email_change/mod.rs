//! Email change flow: request, verify
//!
//! Runs on behalf of an authenticated account (the session gate resolves
//! the caller). The candidate address plus a code live on the account row
//! until the owner proves possession of the new mailbox.

mod service;

#[cfg(test)]
mod tests;

pub use service::EmailChangeService;
