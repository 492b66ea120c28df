//! The login state machine — sequences validation, the network call, and
//! the terminal state.
//!
//! ARCHITECTURE
//! ============
//! State lives in a `watch` channel: the flow is the single writer and any
//! number of subscribers read the current value from any thread. Each
//! `submit` claims a fresh attempt id; emissions from older attempts are
//! dropped rather than cancelled, so a superseded network call finishes
//! quietly without touching the visible state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::auth::AuthClient;
use crate::state::{Credentials, LoginState};
use crate::validate::{self, EmailPattern};

pub struct LoginFlow {
    client: Arc<dyn AuthClient>,
    pattern: EmailPattern,
    state: watch::Sender<LoginState>,
    attempt: AtomicU64,
}

impl LoginFlow {
    #[must_use]
    pub fn new(client: Arc<dyn AuthClient>, pattern: EmailPattern) -> Self {
        let (state, _) = watch::channel(LoginState::Initial);
        Self { client, pattern, state, attempt: AtomicU64::new(0) }
    }

    /// Watch the flow's state. The receiver always holds the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> LoginState {
        self.state.borrow().clone()
    }

    /// Run one login attempt end to end, emitting states as it goes.
    ///
    /// Validation failures stop the attempt before the network call; the
    /// client is only invoked once both fields pass. The terminal state is
    /// `LoginSuccess` or `LoginFailure`, never an unwound error: every
    /// failure surfaces as a renderable state.
    pub async fn submit(&self, credentials: Credentials) {
        let attempt = self.begin_attempt();

        if let Err(e) = validate::validate_email(&credentials.email, &self.pattern) {
            tracing::debug!(reason = %e, "email rejected");
            self.emit(attempt, LoginState::EmailValidationError(e.to_string()));
            return;
        }
        if let Err(e) = validate::validate_password(&credentials.password) {
            tracing::debug!(reason = %e, "password rejected");
            self.emit(attempt, LoginState::PasswordValidationError(e.to_string()));
            return;
        }

        self.emit(attempt, LoginState::Loading);

        match self.client.login(&credentials).await {
            Ok(response) => {
                tracing::info!(email = %credentials.email, "login succeeded");
                self.emit(attempt, LoginState::LoginSuccess(response.token));
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.emit(attempt, LoginState::LoginFailure(e.message_for_ui().to_owned()));
            }
        }
    }

    /// Claim the next attempt id; every older attempt becomes stale.
    fn begin_attempt(&self) -> u64 {
        self.attempt.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `state` unless a newer attempt has started. Returns whether
    /// the emission went through. The check-then-send pair can lose to a
    /// brand-new attempt for at most one emission; supersession is
    /// best-effort.
    fn emit(&self, attempt: u64, state: LoginState) -> bool {
        if self.attempt.load(Ordering::SeqCst) != attempt {
            return false;
        }
        self.state.send_replace(state);
        true
    }
}

#[cfg(test)]
#[path = "flow_test.rs"]
mod tests;
