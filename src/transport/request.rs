//! Request descriptors: what to send, built per call and consumed by the gateway.

use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;

/// Caller-supplied header edits, applied last. `None` removes the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverrides {
    entries: Vec<(String, Option<String>)>,
}

impl HeaderOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((name.into(), Some(value.into())));
        self
    }

    pub fn clear(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), None));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// The multipart encoder sets its own content type with the boundary.
    Multipart(Form),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

#[derive(Debug)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderOverrides,
    pub body: RequestBody,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderOverrides::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers = self.headers.set(name, value);
        self
    }

    pub fn clear_header(mut self, name: impl Into<String>) -> Self {
        self.headers = self.headers.clear(name);
        self
    }
}

/// Merge headers: `defaults` < bearer auth (when a token exists) < `overrides`.
pub fn merge_headers(
    mut defaults: HeaderMap,
    token: Option<&str>,
    overrides: &HeaderOverrides,
) -> Result<HeaderMap> {
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            Error::validation_with_context(
                "Session token is not a valid header value",
                ErrorContext::new().with_field_path("session.token"),
            )
        })?;
        value.set_sensitive(true);
        defaults.insert(AUTHORIZATION, value);
    }

    for (name, value) in overrides.iter() {
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            Error::validation_with_context(
                format!("Invalid header name '{}'", name),
                ErrorContext::new().with_field_path("request.headers"),
            )
        })?;
        match value {
            Some(v) => {
                let v = HeaderValue::from_str(v).map_err(|_| {
                    Error::validation_with_context(
                        format!("Invalid value for header '{}'", name),
                        ErrorContext::new().with_field_path("request.headers"),
                    )
                })?;
                defaults.insert(header, v);
            }
            None => {
                defaults.remove(header);
            }
        }
    }
    Ok(defaults)
}
