use serde::Serialize;
use thiserror::Error;

/// Message carried by every failure where no HTTP response was obtained.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Message used when an error response carries no usable `message` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Message used when a successful response body is not valid JSON.
pub const MALFORMED_BODY_MESSAGE: &str = "Malformed response body";

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error
    /// (e.g., "config.base_url", "endpoint.id")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "file_session_store", "endpoint_call")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Broad classification of a failure, used by callers that only need to
/// branch on "did the server answer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No response was obtained (status 0).
    Network,
    /// The server answered with a non-2xx status.
    Http,
    /// The server answered 2xx but the body was not JSON.
    Decode,
    /// Failure raised locally before or around the call (config, validation, storage).
    Local,
}

/// The caller-visible failure shape: status (0 when no response), message and
/// the parsed error body when there was one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Unified error type for the Datify client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Response decoding error: HTTP {status}: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Session storage error: {message}{}", format_context(.context))]
    Session {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// A transport failure: no response was obtained.
    pub fn network(source: reqwest::Error) -> Self {
        Error::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            source: Some(source),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn session_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Session {
            message: msg.into(),
            context,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Network { .. } => FailureKind::Network,
            Error::Http { .. } => FailureKind::Http,
            Error::Decode { .. } => FailureKind::Decode,
            _ => FailureKind::Local,
        }
    }

    /// Envelope status: 0 for network failures, the HTTP status otherwise.
    /// `None` for local failures that never reached the wire.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Network { .. } => Some(0),
            Error::Http { status, .. } | Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Http { status: 401, .. })
    }

    /// The caller-visible envelope for wire failures.
    pub fn envelope(&self) -> Option<ErrorEnvelope> {
        match self {
            Error::Network { message, .. } => Some(ErrorEnvelope {
                status: 0,
                message: message.clone(),
                data: None,
            }),
            Error::Http {
                status,
                message,
                data,
            } => Some(ErrorEnvelope {
                status: *status,
                message: message.clone(),
                data: data.clone(),
            }),
            Error::Decode { status, .. } => Some(ErrorEnvelope {
                status: *status,
                message: MALFORMED_BODY_MESSAGE.to_string(),
                data: None,
            }),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Session { context, .. } => Some(context),
            _ => None,
        }
    }
}
