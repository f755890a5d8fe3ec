//! Token codec module for signed, time-limited tokens
//!
//! Every token the platform issues goes through this codec: session
//! tokens and registration intent tokens alike. Tokens are opaque JWTs
//! carrying an arbitrary serde payload next to the standard claims.

mod codec;
mod config;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenCodecConfig;
