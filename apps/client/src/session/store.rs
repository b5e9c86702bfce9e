//! Storage backends for the opaque session token.
//!
//! A backend holds at most one token under a single well-known key.
//! Absence of the key is the canonical logged-out state.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use parking_lot::RwLock;
use tempfile::NamedTempFile;

use crate::error::ClientError;

/// Well-known key the token is stored under.
pub const TOKEN_KEY: &str = "token";

pub trait TokenStore: Send + Sync + std::fmt::Debug {
    fn load(&self) -> Result<Option<String>, ClientError>;

    /// Replace any stored token. Readers observe either the old or the new
    /// token, never a partial one.
    fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Remove the stored token. Removing an absent token succeeds.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.token.read().clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.token.write().take();
        Ok(())
    }
}

/// Token persisted as a file named [`TOKEN_KEY`] inside a directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        match fs::read_to_string(self.path()) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::storage(format!(
                "failed to read {}: {e}",
                self.path().display()
            ))),
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        fs::create_dir_all(&self.dir)?;
        // Each save gets its own temp file; a dropped one deletes itself.
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(token.as_bytes())?;
        temp.as_file().sync_all()?;
        // rename within one directory replaces the target atomically
        temp.persist(self.path()).map_err(|e| {
            ClientError::storage(format!("failed to replace token file: {}", e.error))
        })?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::storage(format!(
                "failed to remove {}: {e}",
                self.path().display()
            ))),
        }
    }
}
