//! Client configuration.
//!
//! Defaults match the development backend. Values can come from a YAML file,
//! from `DATIFY_*` environment variables, or both (environment wins).

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Key under which the session blob is persisted.
pub const DEFAULT_SESSION_KEY: &str = "datify_auth";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root every request path is appended to.
    pub base_url: String,
    /// Where the login redirect hook is pointed after a 401.
    pub login_path: String,
    pub session_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub pool_max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            proxy_url: None,
            user_agent: None,
            pool_max_idle_per_host: 32,
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid client configuration: {}", e),
                ErrorContext::new().with_source("config_yaml"),
            )
        })
    }

    pub async fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read configuration: {}", e),
                ErrorContext::new().with_details(path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Apply `DATIFY_API_BASE_URL`, `DATIFY_LOGIN_PATH`, `DATIFY_PROXY_URL`
    /// and `DATIFY_USER_AGENT` when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        if let Some(url) = var("DATIFY_API_BASE_URL") {
            self.base_url = url;
        }
        if let Some(path) = var("DATIFY_LOGIN_PATH") {
            self.login_path = path;
        }
        if let Some(proxy) = var("DATIFY_PROXY_URL") {
            self.proxy_url = Some(proxy);
        }
        if let Some(ua) = var("DATIFY_USER_AGENT") {
            self.user_agent = Some(ua);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(self.base_url.clone()),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("Unsupported base URL scheme '{}'", parsed.scheme()),
                ErrorContext::new().with_field_path("config.base_url"),
            ));
        }
        if !self.login_path.starts_with('/') {
            return Err(Error::configuration_with_context(
                "Login path must start with '/'",
                ErrorContext::new()
                    .with_field_path("config.login_path")
                    .with_details(self.login_path.clone()),
            ));
        }
        if self.session_key.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Session key must not be empty",
                ErrorContext::new().with_field_path("config.session_key"),
            ));
        }
        Ok(())
    }
}
