//! Durable client-side token storage.
//!
//! The persisted session is a single string value under a well-known
//! key, mirroring browser local storage.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::api::ClientError;

/// Well-known storage key for the persisted token.
pub const TOKEN_KEY: &str = "authgate_token";

/// Durable storage for the current bearer token.
pub trait TokenStore: Send + Sync {
    /// Load the persisted token, if any.
    fn load(&self) -> Result<Option<String>, ClientError>;

    /// Persist the token.
    fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Remove the persisted token. Clearing an empty store is fine.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token store backed by a file in a configurable directory.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store persisting under `dir/authgate_token`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TOKEN_KEY),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        std::fs::write(&self.path, token).map_err(|e| ClientError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}

/// In-memory token store for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token, as if persisted by a
    /// previous run.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self
            .token
            .lock()
            .map_err(|_| ClientError::Storage("token store lock poisoned".to_string()))?
            .clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self
            .token
            .lock()
            .map_err(|_| ClientError::Storage("token store lock poisoned".to_string()))? =
            Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self
            .token
            .lock()
            .map_err(|_| ClientError::Storage("token store lock poisoned".to_string()))? = None;
        Ok(())
    }
}
