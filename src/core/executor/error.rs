//! Executor error types.

use thiserror::Error;

/// Result type for executor operations.
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Errors raised while building or performing an outbound request.
///
/// The tools never match on these variants; they format the display string
/// into the error envelope returned to the client.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The resolved URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A relative endpoint was given but no base URL is configured.
    #[error("Relative endpoint '{0}' requires REST_BASE_URL to be set")]
    MissingBaseUrl(String),

    /// A header name or value was not valid for the wire.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Query parameters could not be URL-encoded.
    #[error("Failed to encode query parameters: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The network round trip failed (connectivity, timeout, TLS, ...).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body exceeded the configured size limit.
    #[error("Response size of {size} bytes exceeds the configured limit of {limit} bytes")]
    ResponseTooLarge { size: usize, limit: usize },

    /// Catch-all for failures that carry only a message.
    #[error("{0}")]
    Other(String),
}

impl ExecutorError {
    /// Create an invalid header error.
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a catch-all error from a message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
