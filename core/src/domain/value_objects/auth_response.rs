//! Responses handed back to the HTTP layer after successful auth flows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::Account;

/// Public projection of an account: what other layers may see.
/// The password hash and any in-flight codes never leave the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account identifier
    pub id: Uuid,

    /// Public handle
    pub handle: String,

    /// Email address
    pub email: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            handle: account.handle.clone(),
            email: account.email.clone(),
        }
    }
}

/// Result of any flow that ends in an authenticated session:
/// login, registration confirmation, completed password reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated account
    pub account: AccountSummary,

    /// Bearer session token
    pub session_token: String,
}

impl AuthResponse {
    pub fn new(account: &Account, session_token: String) -> Self {
        Self {
            account: AccountSummary::from(account),
            session_token,
        }
    }
}
