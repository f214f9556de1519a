//! Request and response descriptors exchanged with the executor.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// HTTP methods supported by the request tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Wire representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single outbound request, as assembled by a tool from its parameters.
///
/// Optional fields stay `None` when the caller omitted them; the executor
/// applies its own defaults, not the tools.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Target endpoint. Absolute URLs pass through; relative endpoints are
    /// resolved against the configured base URL.
    pub url: String,

    /// HTTP method, fixed per tool.
    pub method: HttpMethod,

    /// Request body, if any.
    pub body: Option<Value>,

    /// Additional request headers.
    pub headers: Option<HashMap<String, String>>,

    /// When true, no credentials of any kind are attached.
    pub without_authorization: bool,

    /// Overrides the default `application/json` content type.
    pub content_type: Option<String>,

    /// Query parameters appended to the URL.
    pub query_params: Option<HashMap<String, Value>>,
}

impl RequestSpec {
    /// Create a spec with only the mandatory fields set.
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            headers: None,
            without_authorization: false,
            content_type: None,
            query_params: None,
        }
    }
}

/// Normalized response returned by the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    /// Response body, parsed as JSON when possible, otherwise the raw text.
    pub data: Value,

    /// HTTP status code.
    pub status: u16,

    /// Canonical reason phrase for the status code.
    pub status_text: String,

    /// Response headers (values that are not valid UTF-8 are skipped).
    pub headers: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_spec_new_leaves_optionals_absent() {
        let spec = RequestSpec::new("/users", HttpMethod::Post);
        assert_eq!(spec.method, HttpMethod::Post);
        assert!(spec.body.is_none());
        assert!(spec.headers.is_none());
        assert!(spec.content_type.is_none());
        assert!(spec.query_params.is_none());
        assert!(!spec.without_authorization);
    }
}
