//! Persistence of the session blob between runs.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Context;

use adminconsole_auth::Session;

use crate::error::StoreError;

/// Narrow storage adapter for the one session document.
///
/// A blob that cannot be parsed is discarded and reads as "no session".
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, StoreError>;
    fn save(&self, session: &Session) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

fn decode<S: SessionStore + ?Sized>(store: &S, raw: &str) -> Result<Option<Session>, StoreError> {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable session blob");
            store.clear()?;
            Ok(None)
        }
    }
}

/// In-memory store holding the raw JSON text.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<Option<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an arbitrary raw blob (including malformed ones).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.inner.read().ok().and_then(|g| g.clone())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("session store lock poisoned".to_string())
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        let raw = self.inner.read().map_err(|_| poisoned())?.clone();
        match raw {
            Some(raw) => decode(self, &raw),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        *self.inner.write().map_err(|_| poisoned())? = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.inner.write().map_err(|_| poisoned())? = None;
        Ok(())
    }
}

/// JSON file on disk, by default under the platform data directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session directory at {parent:?}"))?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => decode(self, &raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.ensure_parent()
            .map_err(|e| StoreError::Unavailable(format!("{e:#}")))?;
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
