//! reqwest-backed request executor.
//!
//! This is the component that actually talks to the network. It resolves
//! endpoints against the configured base URL, attaches credentials and
//! default headers, enforces the response size limit, and normalizes the
//! response into a [`ResponseData`].

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::error::{ExecutorError, ExecutorResult};
use super::request::{RequestSpec, ResponseData};
use super::RequestExecutor;
use crate::core::config::{CredentialsConfig, HttpClientConfig};

/// Executor that performs real HTTP round trips via reqwest.
#[derive(Debug)]
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: Option<String>,
    response_size_limit: usize,
    api_key: Option<(String, String)>,
}

impl HttpExecutor {
    /// Build an executor from the client and credentials configuration.
    pub fn new(
        config: &HttpClientConfig,
        credentials: &CredentialsConfig,
    ) -> ExecutorResult<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ExecutorError::invalid_header(name, e.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ExecutorError::invalid_header(name, e.to_string()))?;
            default_headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(default_headers)
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()
            .map_err(ExecutorError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            response_size_limit: config.response_size_limit,
            api_key: credentials.api_key_header(),
        })
    }

    /// Resolve an endpoint to a full URL, appending query parameters.
    fn resolve_url(
        &self,
        endpoint: &str,
        query_params: Option<&HashMap<String, Value>>,
    ) -> ExecutorResult<Url> {
        let mut raw = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            match &self.base_url {
                Some(base) => format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    endpoint.trim_start_matches('/')
                ),
                None => return Err(ExecutorError::MissingBaseUrl(endpoint.to_string())),
            }
        };

        if let Some(params) = query_params {
            if !params.is_empty() {
                let mut pairs: Vec<(String, String)> = params
                    .iter()
                    .map(|(k, v)| (k.clone(), query_value(v)))
                    .collect();
                // Stable ordering keeps identical inputs producing identical URLs.
                pairs.sort();
                let encoded = serde_urlencoded::to_string(&pairs)?;
                raw.push(if raw.contains('?') { '&' } else { '?' });
                raw.push_str(&encoded);
            }
        }

        Url::parse(&raw).map_err(|e| ExecutorError::InvalidUrl(format!("{raw}: {e}")))
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(
        &self,
        spec: RequestSpec,
        auth_token: Option<String>,
    ) -> ExecutorResult<ResponseData> {
        let url = self.resolve_url(&spec.url, spec.query_params.as_ref())?;
        debug!("{} {}", spec.method, url);

        let mut request = self.client.request(spec.method.into(), url);

        if let Some(headers) = &spec.headers {
            for (name, value) in headers {
                let header_name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| ExecutorError::invalid_header(name, e.to_string()))?;
                let header_value = HeaderValue::from_str(value)
                    .map_err(|e| ExecutorError::invalid_header(name, e.to_string()))?;
                request = request.header(header_name, header_value);
            }
        }

        if !spec.without_authorization {
            if let Some((name, value)) = &self.api_key {
                request = request.header(name.as_str(), value.as_str());
            }
            if let Some(token) = auth_token {
                request = request.header(reqwest::header::AUTHORIZATION, token);
            }
        }

        if let Some(body) = &spec.body {
            let content_type = spec.content_type.as_deref().unwrap_or("application/json");
            request = request.header(CONTENT_TYPE, content_type);
            request = if content_type.contains("json") {
                request.json(body)
            } else {
                match body {
                    Value::String(text) => request.body(text.clone()),
                    other => request.body(other.to_string()),
                }
            };
        } else if let Some(content_type) = &spec.content_type {
            request = request.header(CONTENT_TYPE, content_type.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let bytes = response.bytes().await?;
        if bytes.len() > self.response_size_limit {
            return Err(ExecutorError::ResponseTooLarge {
                size: bytes.len(),
                limit: self.response_size_limit,
            });
        }

        // Non-JSON bodies are forwarded as plain strings; non-2xx statuses
        // are not errors at this layer, the caller sees the real status.
        let data = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        Ok(ResponseData {
            data,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
        })
    }
}

/// Render an arbitrary JSON value as a query-string value.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::request::HttpMethod;
    use serde_json::json;

    fn executor_with_base(base_url: Option<&str>) -> HttpExecutor {
        let config = HttpClientConfig {
            base_url: base_url.map(|s| s.to_string()),
            ..Default::default()
        };
        HttpExecutor::new(&config, &CredentialsConfig::default()).unwrap()
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let executor = executor_with_base(None);
        let url = executor
            .resolve_url("https://api.example.com/users", None)
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users");
    }

    #[test]
    fn test_relative_endpoint_joins_base_url() {
        let executor = executor_with_base(Some("https://api.example.com/v1/"));
        let url = executor.resolve_url("/users", None).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/users");
    }

    #[test]
    fn test_relative_endpoint_without_base_url_fails() {
        let executor = executor_with_base(None);
        let err = executor.resolve_url("/users", None).unwrap_err();
        assert!(matches!(err, ExecutorError::MissingBaseUrl(_)));
    }

    #[test]
    fn test_query_params_are_encoded() {
        let executor = executor_with_base(None);
        let params = HashMap::from([
            ("q".to_string(), json!("hello world")),
            ("limit".to_string(), json!(10)),
        ]);
        let url = executor
            .resolve_url("https://api.example.com/search", Some(&params))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/search?limit=10&q=hello+world"
        );
    }

    #[test]
    fn test_query_params_append_to_existing_query() {
        let executor = executor_with_base(None);
        let params = HashMap::from([("page".to_string(), json!(2))]);
        let url = executor
            .resolve_url("https://api.example.com/search?q=x", Some(&params))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/search?q=x&page=2");
    }

    #[test]
    fn test_query_value_rendering() {
        assert_eq!(query_value(&json!("plain")), "plain");
        assert_eq!(query_value(&json!(42)), "42");
        assert_eq!(query_value(&json!(true)), "true");
        assert_eq!(query_value(&Value::Null), "");
        assert_eq!(query_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_invalid_default_header_is_rejected() {
        let config = HttpClientConfig {
            default_headers: HashMap::from([(
                "bad header".to_string(),
                "value".to_string(),
            )]),
            ..Default::default()
        };
        let result = HttpExecutor::new(&config, &CredentialsConfig::default());
        assert!(matches!(
            result.unwrap_err(),
            ExecutorError::InvalidHeader { .. }
        ));
    }

    // Integration test (requires network, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_post_round_trip() {
        let executor = executor_with_base(None);
        let mut spec = RequestSpec::new("https://httpbin.org/post", HttpMethod::Post);
        spec.body = Some(json!({"ok": true}));

        let response = executor.execute(spec, None).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
    }
}
