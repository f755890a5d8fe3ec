//! Tests for the session issuer
