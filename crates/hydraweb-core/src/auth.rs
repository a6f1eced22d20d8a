// ABOUTME: Credential validation seam for the admin login flow.
// ABOUTME: Defines the Authenticator trait and its shared-secret implementation.

use std::fmt;

use subtle::ConstantTimeEq;

/// Validates presented credentials and produces the value stored in the
/// session cookie.
///
/// Handlers and middleware only talk to this trait, so the comparison and
/// storage strategy can change without touching call sites.
pub trait Authenticator: Send + Sync {
    /// Returns true iff `presented` grants admin access.
    fn validate(&self, presented: &str) -> bool;

    /// Value written into the session cookie after a successful login.
    fn session_value(&self) -> String;
}

/// A single shared secret used both as bearer token and as session cookie value.
#[derive(Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Authenticator for SharedSecret {
    fn validate(&self, presented: &str) -> bool {
        if presented.is_empty() || self.secret.is_empty() {
            return false;
        }
        presented.as_bytes().ct_eq(self.secret.as_bytes()).into()
    }

    fn session_value(&self) -> String {
        self.secret.clone()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}
