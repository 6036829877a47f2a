//! Shared application state injected into every Axum handler.

use std::fmt;
use std::sync::Arc;

use subtle::ConstantTimeEq;

/// The single username/password pair allowed through the auth gate.
///
/// Built once at startup and never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `true` when both halves match exactly.
    ///
    /// Byte contents are compared in constant time and both halves are always
    /// checked; only the lengths can leak through timing.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application state shared across all request handlers.
///
/// Cheap to clone: Axum clones it for every request.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Credentials checked by the auth middleware.
    pub credentials: Arc<Credentials>,
}

impl AppState {
    /// Create a new [`AppState`] around the configured credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_requires_both_halves() {
        let creds = Credentials::new("admin", "secret");
        assert!(creds.matches("admin", "secret"));
        assert!(!creds.matches("admin", "Secret"));
        assert!(!creds.matches("root", "secret"));
        assert!(!creds.matches("", ""));
    }

    #[test]
    fn matches_rejects_near_misses() {
        let creds = Credentials::new("admin", "secret");
        assert!(!creds.matches("admin", "secreT"));
        assert!(!creds.matches("admin", "secre"));
        assert!(!creds.matches("admin", "secrets"));
        assert!(!creds.matches("admim", "secret"));
        assert!(!creds.matches("secret", "admin"));
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", AppState::new(Credentials::new("admin", "hunter2")));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
