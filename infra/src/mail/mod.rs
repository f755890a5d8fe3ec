//! Mail service module - outbound email delivery
//!
//! The notifier behind every verification flow. Provides:
//! - An HTTP transactional email provider client for production
//! - A mock implementation for development and testing
//! - An adapter bridging either onto the core `MailServiceTrait`

pub mod adapter;
pub mod http_api;
pub mod mail_service;
pub mod mock;

pub use adapter::MailServiceAdapter;
pub use http_api::{HttpApiMailer, HttpMailerConfig};
pub use mail_service::MailService;
pub use mock::MockMailService;
