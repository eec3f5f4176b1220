use crate::client::core::DatifyClient;
use crate::config::ClientConfig;
use crate::redirect::LoginRedirect;
use crate::session::{FileSessionStore, SessionStore};
use crate::transport::RequestGateway;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the session lives. Keyed stores are created at build time so they
/// pick up `ClientConfig::session_key`.
enum SessionBackend {
    Store(Arc<dyn SessionStore>),
    FileIn(PathBuf),
    #[cfg(feature = "keyring-store")]
    Keyring,
}

impl SessionBackend {
    fn resolve(self, config: &ClientConfig) -> Arc<dyn SessionStore> {
        match self {
            SessionBackend::Store(store) => store,
            SessionBackend::FileIn(dir) => {
                Arc::new(FileSessionStore::in_dir(dir, &config.session_key))
            }
            #[cfg(feature = "keyring-store")]
            SessionBackend::Keyring => Arc::new(crate::session::KeyringSessionStore::new(
                config.session_key.clone(),
            )),
        }
    }
}

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable.
pub struct DatifyClientBuilder {
    config: Option<ClientConfig>,
    session: SessionBackend,
    redirect: Arc<dyn LoginRedirect>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
}

impl DatifyClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            session: SessionBackend::Store(crate::session::memory_store()),
            redirect: crate::redirect::noop_redirect(),
            base_url_override: None,
        }
    }

    /// Use an explicit configuration instead of defaults + environment.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Inject the session store. Default is an in-memory store.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = SessionBackend::Store(store);
        self
    }

    /// Persist the session as `<dir>/<session_key>.json`.
    pub fn file_session(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session = SessionBackend::FileIn(dir.into());
        self
    }

    /// Persist the session in the OS keyring under `session_key`.
    #[cfg(feature = "keyring-store")]
    pub fn keyring_session(mut self) -> Self {
        self.session = SessionBackend::Keyring;
        self
    }

    /// Inject the hook run after a 401. Default does nothing.
    pub fn login_redirect(mut self, redirect: Arc<dyn LoginRedirect>) -> Self {
        self.redirect = redirect;
        self
    }

    /// Override the configured base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<DatifyClient> {
        let mut config = self.config.unwrap_or_else(ClientConfig::from_env);
        if let Some(url) = self.base_url_override {
            config.base_url = url;
        }
        config.validate()?;
        let session = self.session.resolve(&config);

        tracing::debug!(
            base_url = %config.base_url,
            session_store = session.name(),
            session_key = %config.session_key,
            "building datify client"
        );

        let gateway = RequestGateway::new(&config, session, self.redirect)?;
        Ok(DatifyClient {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        })
    }
}

impl Default for DatifyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
