//! Error types for the relay.
//!
//! [`ClientError`] describes a failed Semantic Scholar call, [`ToolError`] a
//! failed tool invocation. Neither is retried: a failure travels straight back
//! to the MCP caller.

use std::time::Duration;

/// Fallback wait reported for a 429 without a usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// A Semantic Scholar request that did not produce a JSON body.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The request never got an answer (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be built from the configured base.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// 429 from the API.
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// 404 from the API; `resource` is the response body.
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// 400 from the API.
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// A 2xx body that was not JSON.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// 5xx from the API.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status.
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

impl ClientError {
    /// Map a non-2xx status and its body onto a variant.
    ///
    /// `retry_after_secs` is only consulted for 429.
    #[must_use]
    pub fn from_status(status: u16, body: String, retry_after_secs: Option<u64>) -> Self {
        match status {
            429 => Self::RateLimited {
                retry_after: retry_after_secs.map_or(DEFAULT_RETRY_AFTER, Duration::from_secs),
            },
            404 => Self::NotFound { resource: body },
            400 => Self::BadRequest { message: body },
            500..=599 => Self::Server { status, message: body },
            _ => Self::UnexpectedStatus { status, message: body },
        }
    }

    /// HTTP status behind this error, if the API answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(_) | Self::Url(_) | Self::Parse(_) => None,
        }
    }

    /// Wait the API asked for, when it rate limited us.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// A tool call that failed before, during or after its API request.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// The forwarded request failed.
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// An argument was present but unusable (e.g. a blank ID). Raised
    /// before the rate gate, so it costs no permit.
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    /// Arguments did not match the tool's input shape, or the result could
    /// not be rendered.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Message placed in the JSON-RPC error returned to the MCP client.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by Semantic Scholar API. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Client(ClientError::NotFound { resource }) => {
                format!("Not found: {resource}. Please check the ID is correct.")
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
