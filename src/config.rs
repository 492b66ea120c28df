//! Environment configuration for the login flow binary.

use std::path::PathBuf;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOKEN_STORE_PATH: &str = "token.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: String },
}

/// Request/connect timeouts for the HTTP auth client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub base_url: String,
    pub timeouts: AuthTimeouts,
    pub token_path: PathBuf,
}

impl AuthConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `AUTH_BASE_URL`: base URL of the authentication server
    ///
    /// Optional:
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 10
    /// - `TOKEN_STORE_PATH`: default `token.json`
    ///
    /// # Errors
    ///
    /// Returns an error when `AUTH_BASE_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("AUTH_BASE_URL")
            .map_err(|_| ConfigError::MissingVar { var: "AUTH_BASE_URL".into() })?
            .trim_end_matches('/')
            .to_string();

        let timeouts = AuthTimeouts {
            request_secs: env_parse_u64("AUTH_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("AUTH_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let token_path = std::env::var("TOKEN_STORE_PATH")
            .unwrap_or_else(|_| DEFAULT_TOKEN_STORE_PATH.to_owned())
            .into();

        Ok(Self { base_url, timeouts, token_path })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
