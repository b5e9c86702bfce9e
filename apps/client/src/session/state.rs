//! The session capability shared by the client and its consumers.
//!
//! Every query re-reads the store and re-decodes the token, so replacing the
//! token is visible immediately. The only in-process state is the marker left
//! by an invalidation the store failed to persist.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::{self, Claims};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Absent,
    Standard,
    Elevated,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    store: Arc<dyn TokenStore>,
    // Set by `invalidate`, cleared by the next successful `establish`.
    invalidated: Arc<AtomicBool>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            invalidated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Session backed by process-local memory, initially logged out.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// File-backed when the config names a token directory, else in memory.
    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.token_dir {
            Some(dir) => Self::new(Arc::new(FileTokenStore::new(dir))),
            None => Self::in_memory(),
        }
    }

    /// The stored token, if present and non-empty.
    ///
    /// Storage read failures are logged and reported as no token.
    pub fn current(&self) -> Option<String> {
        if self.invalidated.load(Ordering::Acquire) {
            return None;
        }
        match self.store.load() {
            Ok(Some(token)) if !token.trim().is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "token storage unreadable; treating session as absent");
                None
            }
        }
    }

    pub fn has_token(&self) -> bool {
        self.current().is_some()
    }

    /// Claims of the current token, or `None` when absent or undecodable.
    pub fn claims(&self) -> Option<Claims> {
        let token = self.current()?;
        match auth::decode(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "stored token failed to decode");
                None
            }
        }
    }

    /// Fails closed: any missing token, decode failure, or missing claim
    /// yields `false`.
    pub fn has_elevated_privilege(&self) -> bool {
        self.claims().is_some_and(|c| c.is_admin())
    }

    /// A structurally invalid token counts as [`SessionStatus::Absent`].
    pub fn status(&self) -> SessionStatus {
        match self.claims() {
            None => SessionStatus::Absent,
            Some(c) if c.is_admin() => SessionStatus::Elevated,
            Some(_) => SessionStatus::Standard,
        }
    }

    /// Store a new token, replacing any previous one.
    pub fn establish(&self, token: &str) -> Result<(), ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::invalid_token("token must not be empty"));
        }
        self.store.save(token)?;
        self.invalidated.store(false, Ordering::Release);
        info!(status = ?self.status(), "session established");
        Ok(())
    }

    /// Remove the stored token. Safe to call repeatedly or concurrently.
    ///
    /// The session reads as absent afterwards even when the store cannot
    /// delete the token, until the next `establish`.
    pub fn invalidate(&self) {
        self.invalidated.store(true, Ordering::Release);
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored token; session stays invalidated in memory");
            return;
        }
        debug!("session invalidated");
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
