//! Login state — credentials, the auth token, and the closed set of
//! outcomes a login attempt can be in.

use std::fmt;

/// Email/password pair submitted for a single login attempt.
///
/// Transient: built per attempt, never persisted by the core. `Debug` hides
/// the password so credentials are safe to log.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque token returned by a successful login.
///
/// Lifecycle ends at this crate's boundary; storage belongs to a
/// [`crate::store::CredentialStore`]. `Debug` never reveals the value.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only tokens count as "not signed in".
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Observable state of the login flow.
///
/// Exactly one value is current at a time; the flow is the only writer.
/// Per attempt the sequence is `Initial`, then either a validation error,
/// or `Loading` followed by `LoginSuccess`/`LoginFailure`. Messages carried
/// by the error variants are ready to render as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Initial,
    Loading,
    EmailValidationError(String),
    PasswordValidationError(String),
    LoginFailure(String),
    LoginSuccess(AuthToken),
}

impl LoginState {
    /// `true` once the current attempt has finished, one way or the other.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::LoginSuccess(_) | Self::LoginFailure(_))
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
