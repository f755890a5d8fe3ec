//! Tests for the password reset flow
