//! Field validators — pure checks over the email and password inputs.
//!
//! The email pattern is injectable so tests (and embedders with their own
//! notion of a valid address) can substitute it. Error display strings are
//! the exact lines a front end renders next to the field.

use regex::Regex;

/// General-purpose email address pattern: a bounded local part, an `@`, and
/// one or more dot-separated domain labels.
const DEFAULT_EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$";

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;

/// Compiled email pattern handed to the flow at construction.
#[derive(Debug, Clone)]
pub struct EmailPattern(Regex);

impl EmailPattern {
    /// Compile a caller-supplied pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error for an invalid pattern.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        Self(regex)
    }

    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.0.is_match(input)
    }
}

impl Default for EmailPattern {
    fn default() -> Self {
        Self::compile(DEFAULT_EMAIL_PATTERN).expect("default email pattern compiles")
    }
}

/// Why an email input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,
    #[error("Invalid email address")]
    Format,
}

/// Why a password input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    Empty,
    #[error("Password must be 8 to 20 characters long!")]
    Length,
}

/// Check an email input against the supplied pattern.
///
/// # Errors
///
/// `Empty` for blank input, `Format` when the pattern does not match.
pub fn validate_email(input: &str, pattern: &EmailPattern) -> Result<(), EmailError> {
    if input.trim().is_empty() {
        return Err(EmailError::Empty);
    }
    if !pattern.matches(input) {
        return Err(EmailError::Format);
    }
    Ok(())
}

/// Check a password input: non-blank and 8 to 20 characters inclusive.
///
/// # Errors
///
/// `Empty` for blank input, `Length` when outside the window.
pub fn validate_password(input: &str) -> Result<(), PasswordError> {
    if input.trim().is_empty() {
        return Err(PasswordError::Empty);
    }
    let len = input.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(PasswordError::Length);
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
