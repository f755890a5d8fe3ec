//! # Infrastructure Layer
//!
//! Concrete implementations of the interfaces the core defines:
//!
//! - **Database**: MySQL account repository using SQLx
//! - **Mail**: transactional email provider client over HTTP, plus a
//!   mock for development and tests

pub mod database;
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail provider error
    #[error("Mail service error: {0}")]
    Mail(String),
}
