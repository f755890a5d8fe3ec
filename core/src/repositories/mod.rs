//! Repository interfaces for the persistence layer.

pub mod account;

pub use account::{AccountRepository, MockAccountRepository};
