//! HTTP implementation of [`AuthClient`] over reqwest.
//!
//! Thin wrapper around `POST {base_url}/login`. Pure body handling lives in
//! `parse_response`/`decode_error_message` for testability.

use std::time::Duration;

use super::{AuthClient, AuthError, DECODE_FALLBACK_MESSAGE, ErrorBody, LoginRequest, LoginResponse};
use crate::config::AuthTimeouts;
use crate::state::Credentials;

pub struct HttpAuthClient {
    http: reqwest::Client,
    login_url: String,
}

impl HttpAuthClient {
    /// Build a client posting to `{base_url}/login` with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ClientBuild`] when the reqwest client cannot be
    /// constructed.
    pub fn new(base_url: &str, timeouts: AuthTimeouts) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::ClientBuild(e.to_string()))?;

        let login_url = format!("{}/login", base_url.trim_end_matches('/'));
        Ok(Self { http, login_url })
    }
}

#[async_trait::async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let body = LoginRequest { email: &credentials.email, password: &credentials.password };

        let response = self
            .http
            .post(&self.login_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::Server {
                status: status.as_u16(),
                message: decode_error_message(&text),
            });
        }

        parse_response(&text)
    }
}

fn parse_response(json: &str) -> Result<LoginResponse, AuthError> {
    serde_json::from_str(json).map_err(|e| AuthError::Decode(e.to_string()))
}

/// Non-2xx bodies carry `{"error": "..."}`; anything else falls back to a
/// generic line.
fn decode_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(decoded) => decoded.error,
        Err(_) => DECODE_FALLBACK_MESSAGE.to_owned(),
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
