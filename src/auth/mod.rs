//! Authentication collaborator — the trait the flow calls, its wire types,
//! and the error taxonomy.

pub mod http;

pub use http::HttpAuthClient;

use crate::state::{AuthToken, Credentials};

/// Rendered when a non-2xx error body does not decode.
pub(crate) const DECODE_FALLBACK_MESSAGE: &str = "something went wrong";

/// Rendered when the request never produced a usable response.
pub(crate) const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong!";

/// Errors produced by [`AuthClient`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status. `message` is already
    /// human-readable: the decoded error body or the generic fallback.
    #[error("login rejected: status {status}: {message}")]
    Server { status: u16, message: String },

    /// A success response body could not be deserialized.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl AuthError {
    /// The line a front end should render for this failure.
    #[must_use]
    pub fn message_for_ui(&self) -> &str {
        match self {
            Self::Server { message, .. } => message,
            Self::Transport(_) | Self::Decode(_) | Self::ClientBuild(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Wire request body for `POST /login`. No `Debug`: it would print the
/// password.
#[derive(serde::Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Success response body: `{"token": "..."}`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginResponse {
    pub token: AuthToken,
}

/// Error response body, decoded only on non-2xx: `{"error": "..."}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// External collaborator performing the network authentication call.
#[async_trait::async_trait]
pub trait AuthClient: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;
}
