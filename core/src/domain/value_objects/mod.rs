//! Value objects returned by the flow services.

pub mod auth_response;

pub use auth_response::{AccountSummary, AuthResponse};
