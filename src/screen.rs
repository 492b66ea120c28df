//! Screen-level glue — what the surrounding UI does with flow states.
//!
//! Front ends only render; skip-login and persist-on-success live here so
//! every front end gets the same behavior. Store failures are logged and
//! swallowed: a broken token file must not take the login flow down.

use std::sync::Arc;

use crate::flow::LoginFlow;
use crate::state::LoginState;
use crate::store::CredentialStore;

pub struct LoginScreen {
    flow: Arc<LoginFlow>,
    store: Arc<dyn CredentialStore>,
}

impl LoginScreen {
    #[must_use]
    pub fn new(flow: Arc<LoginFlow>, store: Arc<dyn CredentialStore>) -> Self {
        Self { flow, store }
    }

    #[must_use]
    pub fn flow(&self) -> &LoginFlow {
        &self.flow
    }

    /// `true` when a non-blank token is already stored; the login prompt is
    /// skipped in that case.
    pub async fn already_authenticated(&self) -> bool {
        match self.store.load_token().await {
            Ok(Some(token)) => !token.is_blank(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "token load failed, treating as signed out");
                false
            }
        }
    }

    /// React to a state the flow emitted. Success persists the token; every
    /// other state is the front end's to render.
    pub async fn handle_state(&self, state: &LoginState) {
        if let LoginState::LoginSuccess(token) = state {
            if let Err(e) = self.store.save_token(token).await {
                tracing::warn!(error = %e, "token save failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "screen_test.rs"]
mod tests;
