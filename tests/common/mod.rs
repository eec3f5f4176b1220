//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use datify_client::{
    ClientConfig, DatifyClient, InMemoryLoginRedirect, MemorySessionStore, SessionStore,
};
use mockito::{Server, ServerGuard};
use std::sync::Arc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test fixture: a mock API server plus a client pointed at it, with an
/// inspectable session store and redirect hook.
pub struct MockApi {
    pub server: ServerGuard,
    pub session: Arc<MemorySessionStore>,
    pub redirect: Arc<InMemoryLoginRedirect>,
    pub client: DatifyClient,
}

impl MockApi {
    pub async fn new() -> Self {
        Self::with_session(MemorySessionStore::new()).await
    }

    pub async fn with_token(token: &str) -> Self {
        Self::with_session(MemorySessionStore::with_token(token)).await
    }

    async fn with_session(store: MemorySessionStore) -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let session = Arc::new(store);
        let redirect = Arc::new(InMemoryLoginRedirect::new());
        let client = DatifyClient::builder()
            .config(ClientConfig::default())
            .base_url_override(format!("{}/api", server.url()))
            .session_store(session.clone())
            .login_redirect(redirect.clone())
            .build()
            .expect("client builds against mock server");
        Self {
            server,
            session,
            redirect,
            client,
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.session.token().await.expect("memory store never fails")
    }
}

/// Client pointed at a port nothing listens on.
pub fn unreachable_client() -> DatifyClient {
    init_tracing();
    DatifyClient::builder()
        .config(ClientConfig::default())
        .base_url_override("http://127.0.0.1:1/api")
        .session_store(Arc::new(MemorySessionStore::with_token("t")))
        .build()
        .expect("client builds")
}
