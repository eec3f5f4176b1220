use crate::api::{AuthApi, ChatApi, DiscoveryApi, ReelsApi, SubscriptionsApi, UsersApi};
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::transport::{RequestDescriptor, RequestGateway};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

use super::builder::DatifyClientBuilder;

/// Datify API client. Cheap to clone; clones share the gateway and session.
#[derive(Clone)]
pub struct DatifyClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) gateway: Arc<RequestGateway>,
}

impl DatifyClient {
    pub fn builder() -> DatifyClientBuilder {
        DatifyClientBuilder::new()
    }

    /// Build with defaults plus `DATIFY_*` environment overrides.
    pub fn from_env() -> Result<Self> {
        DatifyClientBuilder::new().build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.gateway.session()
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session().token().await?.is_some())
    }

    /// Escape hatch for endpoints the catalog does not cover.
    pub async fn send(&self, request: RequestDescriptor) -> Result<Value> {
        self.gateway.send(request).await
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.gateway)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.gateway)
    }

    pub fn discovery(&self) -> DiscoveryApi<'_> {
        DiscoveryApi::new(&self.gateway)
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(&self.gateway)
    }

    pub fn reels(&self) -> ReelsApi<'_> {
        ReelsApi::new(&self.gateway)
    }

    pub fn subscriptions(&self) -> SubscriptionsApi<'_> {
        SubscriptionsApi::new(&self.gateway)
    }
}
