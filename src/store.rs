//! Token persistence — the collaborator the surrounding screen uses to
//! remember a login between runs.
//!
//! The core never touches storage itself; it hands the token over at the
//! success boundary and the screen decides where it lives.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::state::AuthToken;

/// Storage key for the session token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Persists and retrieves the auth token for the surrounding screen.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load_token(&self) -> Result<Option<AuthToken>, StoreError>;
    async fn save_token(&self, token: &AuthToken) -> Result<(), StoreError>;
    async fn clear_token(&self) -> Result<(), StoreError>;
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl CredentialStore for MemoryStore {
    async fn load_token(&self) -> Result<Option<AuthToken>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(TOKEN_KEY).map(|raw| AuthToken::new(raw.as_str())))
    }

    async fn save_token(&self, token: &AuthToken) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(TOKEN_KEY.to_owned(), token.as_str().to_owned());
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(TOKEN_KEY);
        Ok(())
    }
}

/// Flat JSON document on disk, keyed by [`TOKEN_KEY`]. The durable store
/// the demo binary uses.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(map)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialStore for FileStore {
    async fn load_token(&self) -> Result<Option<AuthToken>, StoreError> {
        let map = self.read_map().await?;
        Ok(map.get(TOKEN_KEY).map(|raw| AuthToken::new(raw.as_str())))
    }

    async fn save_token(&self, token: &AuthToken) -> Result<(), StoreError> {
        let mut map = self.read_map().await?;
        map.insert(TOKEN_KEY.to_owned(), token.as_str().to_owned());
        self.write_map(&map).await
    }

    async fn clear_token(&self) -> Result<(), StoreError> {
        let mut map = self.read_map().await?;
        map.remove(TOKEN_KEY);
        self.write_map(&map).await
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
