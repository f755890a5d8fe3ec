//! Short numeric verification codes delivered out of band.

use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// Generate a 6-digit verification code, uniform in 100000-999999.
///
/// Codes only need to resist guessing within a 10-15 minute validity
/// window (the HTTP layer rate-limits attempts), but they are drawn from
/// the OS CSPRNG anyway since it costs nothing.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    let code: u32 = rng.gen_range(100_000..1_000_000);
    code.to_string()
}

/// Constant-time comparison of a stored code against user input.
pub fn codes_match(stored: &str, provided: &str) -> bool {
    if stored.len() != provided.len() {
        return false;
    }
    constant_time_eq(stored.as_bytes(), provided.as_bytes())
}
