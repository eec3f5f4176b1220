use super::request::{merge_headers, RequestBody, RequestDescriptor};
use crate::config::ClientConfig;
use crate::error::FALLBACK_ERROR_MESSAGE;
use crate::redirect::LoginRedirect;
use crate::session::SessionStore;
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Proxy, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sends request descriptors to the API and normalizes every failure.
///
/// Every call is fire-once: no retries, no backoff, no timeout beyond what
/// the OS imposes on the connection.
#[derive(Clone)]
pub struct RequestGateway {
    client: reqwest::Client,
    base_url: String,
    login_path: String,
    session: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
}

impl RequestGateway {
    pub fn new(
        config: &ClientConfig,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path("config.proxy_url"),
                )
            })?;
            builder = builder.proxy(proxy);
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua.clone());
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login_path: config.login_path.clone(),
            session,
            redirect,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Lowest-priority headers: JSON content type (except for multipart
    /// bodies) and a fresh correlation id.
    pub fn default_headers(body: &RequestBody) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if !body.is_multipart() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Ok(id) = HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()) {
            headers.insert(REQUEST_ID_HEADER, id);
        }
        headers
    }

    pub async fn send(&self, request: RequestDescriptor) -> Result<Value> {
        let RequestDescriptor {
            method,
            path,
            query,
            headers: overrides,
            body,
        } = request;

        let url = self.url_for(&path);
        let token = self.session.token().await?;
        let headers = merge_headers(Self::default_headers(&body), token.as_deref(), &overrides)?;
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        let mut req = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            req = req.query(&query);
        }
        req = match body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(form) => req.multipart(form),
        };
        // Replaces per name, so a multipart content type set above survives.
        req = req.headers(headers);

        tracing::debug!(
            method = %method,
            url = %url,
            request_id = %request_id,
            authenticated = token.is_some(),
            "sending request"
        );

        let response = req.send().await.map_err(|e| {
            tracing::warn!("Network error for {} {}: {}", method, url, e);
            Error::network(e)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read response body for {} {}: {}", method, url, e);
            Error::network(e)
        })?;

        tracing::debug!(
            method = %method,
            url = %url,
            request_id = %request_id,
            status = status.as_u16(),
            "received response"
        );

        let parsed = parse_body(&bytes);
        if status.is_success() {
            return match parsed {
                Ok(value) => Ok(value.unwrap_or(Value::Null)),
                Err(source) => Err(Error::Decode {
                    status: status.as_u16(),
                    source,
                }),
            };
        }

        let data = parsed.ok().flatten();
        let message = error_message(data.as_ref());
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_session().await;
        }
        Err(Error::Http {
            status: status.as_u16(),
            message,
            data,
        })
    }

    /// Like [`send`](Self::send), decoding the body into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        let value = self.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Drop the stored session and fire the login redirect. Store failures are
    /// logged; the caller still gets the 401.
    async fn invalidate_session(&self) {
        tracing::warn!(
            "Received 401; clearing {} session and redirecting to {}",
            self.session.name(),
            self.login_path
        );
        if let Err(e) = self.session.clear().await {
            tracing::warn!("Failed to clear session after 401: {}", e);
        }
        self.redirect.redirect_to_login(&self.login_path);
    }
}

/// Empty (or whitespace-only) bodies parse to `None`.
fn parse_body(bytes: &[u8]) -> std::result::Result<Option<Value>, serde_json::Error> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some)
}

fn error_message(data: Option<&Value>) -> String {
    data.and_then(|d| d.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
        .to_string()
}
