//! Shared utilities and common types for the Savora server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types, constructed once at startup
//! - Validation utilities (email, handle)
//! - Common type definitions

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, JwtConfig, MailConfig};
pub use utils::validation;
