//! Flow services containing the verification and confirmation logic.

pub mod account;
pub mod duplicates;
pub mod email_change;
pub mod mail;
pub mod password;
pub mod password_reset;
pub mod registration;
pub mod session;
pub mod token;
pub mod verification_code;

// Re-export commonly used types
pub use account::AccountService;
pub use duplicates::{check_identity, supersede_ghosts, IdentityCheck};
pub use email_change::EmailChangeService;
pub use mail::MailServiceTrait;
pub use password_reset::PasswordResetService;
pub use registration::{RegistrationConfig, RegistrationService, RegistrationSubmitted};
pub use session::{SessionConfig, SessionService};
pub use token::{TokenCodec, TokenCodecConfig};
