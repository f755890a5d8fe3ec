//! Tests for account management
