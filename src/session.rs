//! Session storage backends.
//!
//! The session is a single bearer token persisted as the JSON blob
//! `{"token": "..."}`. The gateway reads it before every request and clears
//! it when the server answers 401.

use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Parse a persisted blob. Empty tokens and unreadable blobs count as no session.
    pub fn from_blob(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Session>(raw) {
            Ok(session) if !session.token.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session blob: {}", e);
                None
            }
        }
    }

    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>>;
    async fn save(&self, session: &Session) -> Result<()>;
    /// Remove the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
    fn name(&self) -> &'static str;

    async fn token(&self) -> Result<Option<String>> {
        Ok(self.load().await?.map(|s| s.token))
    }
}

/// Process-local store. The default when nothing else is configured.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Arc<RwLock<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(Session::new(token)))),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        let guard = self.session.read().map_err(|_| poisoned("memory"))?;
        Ok(guard.clone().filter(|s| !s.token.is_empty()))
    }
    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.write().map_err(|_| poisoned("memory"))? = Some(session.clone());
        Ok(())
    }
    async fn clear(&self) -> Result<()> {
        *self.session.write().map_err(|_| poisoned("memory"))? = None;
        Ok(())
    }
    fn name(&self) -> &'static str {
        "memory"
    }
}

fn poisoned(store: &str) -> Error {
    Error::session_with_context(
        "Session lock poisoned",
        ErrorContext::new().with_source(format!("{}_session_store", store)),
    )
}

/// Stores the session blob in a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/<key>.json`, mirroring one local-storage key per file.
    pub fn in_dir(dir: impl AsRef<Path>, key: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", key)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Session::from_blob(&raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, session.to_blob()?).await?;
        Ok(())
    }
    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
    fn name(&self) -> &'static str {
        "file"
    }
}

/// Stores the session blob in the OS credential store.
#[cfg(feature = "keyring-store")]
pub struct KeyringSessionStore {
    service: String,
    key: String,
}

#[cfg(feature = "keyring-store")]
impl KeyringSessionStore {
    pub const SERVICE: &'static str = "datify";

    pub fn new(key: impl Into<String>) -> Self {
        Self {
            service: Self::SERVICE.to_string(),
            key: key.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.key).map_err(keyring_error)
    }
}

#[cfg(feature = "keyring-store")]
fn keyring_error(e: keyring::Error) -> Error {
    Error::session_with_context(
        format!("Keyring access failed: {}", e),
        ErrorContext::new().with_source("keyring_session_store"),
    )
}

#[cfg(feature = "keyring-store")]
#[async_trait]
impl SessionStore for KeyringSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        match self.entry()?.get_password() {
            Ok(raw) => Ok(Session::from_blob(&raw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_error(e)),
        }
    }
    async fn save(&self, session: &Session) -> Result<()> {
        self.entry()?
            .set_password(&session.to_blob()?)
            .map_err(keyring_error)
    }
    async fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_error(e)),
        }
    }
    fn name(&self) -> &'static str {
        "keyring"
    }
}

pub fn memory_store() -> Arc<dyn SessionStore> {
    Arc::new(MemorySessionStore::new())
}
