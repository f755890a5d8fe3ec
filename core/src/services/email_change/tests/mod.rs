//! Tests for the email change flow

#[cfg(test)]
mod service_tests;
