//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use super::transport::TransportConfig;

/// Default outbound request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default response size limit in bytes.
const DEFAULT_RESPONSE_SIZE_LIMIT: usize = 10_000;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Outbound HTTP client configuration.
    pub client: HttpClientConfig,

    /// Credentials attached to outbound requests.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the outbound HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Base URL that relative endpoints are resolved against.
    pub base_url: Option<String>,

    /// Whether to verify TLS certificates on outbound requests.
    pub ssl_verify: bool,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Maximum response body size in bytes; larger responses are rejected.
    pub response_size_limit: usize,

    /// Headers attached to every outbound request (from `HEADER_*` env vars).
    pub default_headers: HashMap<String, String>,
}

/// Credentials for the target REST API.
///
/// Basic auth takes precedence over a bearer token when both are set; an
/// API key rides along as its own header.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Username for HTTP basic auth.
    pub basic_username: Option<String>,

    /// Password for HTTP basic auth.
    pub basic_password: Option<String>,

    /// Bearer token, sent as `Authorization: Bearer <token>` unless it
    /// already carries a scheme prefix.
    pub bearer_token: Option<String>,

    /// Header name for API key authentication.
    pub apikey_header_name: Option<String>,

    /// API key value.
    pub apikey_value: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("basic_username", &self.basic_username)
            .field(
                "basic_password",
                &self.basic_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("apikey_header_name", &self.apikey_header_name)
            .field(
                "apikey_value",
                &self.apikey_value.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CredentialsConfig {
    /// Resolve the `Authorization` header value, if any credentials are set.
    ///
    /// Basic auth wins over a bearer token. A bearer token that already
    /// starts with a known scheme is used verbatim.
    pub fn authorization_header(&self) -> Option<String> {
        if let (Some(username), Some(password)) = (&self.basic_username, &self.basic_password) {
            let encoded = BASE64.encode(format!("{username}:{password}"));
            return Some(format!("Basic {encoded}"));
        }

        self.bearer_token.as_ref().map(|token| {
            if token.starts_with("Bearer ") || token.starts_with("Basic ") {
                token.clone()
            } else {
                format!("Bearer {token}")
            }
        })
    }

    /// The API key header as a (name, value) pair, when fully configured.
    pub fn api_key_header(&self) -> Option<(String, String)> {
        match (&self.apikey_header_name, &self.apikey_value) {
            (Some(name), Some(value)) => Some((name.clone(), value.clone())),
            _ => None,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            ssl_verify: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            response_size_limit: DEFAULT_RESPONSE_SIZE_LIMIT,
            default_headers: HashMap::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "rest-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            client: HttpClientConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server and transport variables are prefixed with `MCP_`; the target
    /// API is described by `REST_*`, `AUTH_*` and `HEADER_*` variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("REST_BASE_URL") {
            config.client.base_url = Some(base_url);
        } else {
            warn!(
                "REST_BASE_URL not set - only absolute URLs will be accepted \
                 by the request tools"
            );
        }

        if let Ok(verify) = std::env::var("REST_ENABLE_SSL_VERIFY") {
            config.client.ssl_verify = verify.to_lowercase() != "false" && verify != "0";
            if !config.client.ssl_verify {
                warn!("TLS certificate verification is DISABLED for outbound requests");
            }
        }

        if let Ok(timeout) = std::env::var("REST_TIMEOUT_MS") {
            config.client.timeout_ms = timeout.parse().unwrap_or(DEFAULT_TIMEOUT_MS);
        }

        if let Ok(limit) = std::env::var("REST_RESPONSE_SIZE_LIMIT") {
            config.client.response_size_limit =
                limit.parse().unwrap_or(DEFAULT_RESPONSE_SIZE_LIMIT);
        }

        // HEADER_<NAME>=value becomes a default header on every request.
        for (key, value) in std::env::vars() {
            if let Some(name) = key.strip_prefix("HEADER_") {
                if !name.is_empty() {
                    config
                        .client
                        .default_headers
                        .insert(name.replace('_', "-"), value);
                }
            }
        }

        config.credentials = CredentialsConfig {
            basic_username: std::env::var("AUTH_BASIC_USERNAME").ok(),
            basic_password: std::env::var("AUTH_BASIC_PASSWORD").ok(),
            bearer_token: std::env::var("AUTH_BEARER").ok(),
            apikey_header_name: std::env::var("AUTH_APIKEY_HEADER_NAME").ok(),
            apikey_value: std::env::var("AUTH_APIKEY_VALUE").ok(),
        };

        if config.credentials.authorization_header().is_some()
            || config.credentials.api_key_header().is_some()
        {
            info!("Outbound request credentials loaded from environment");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "REST_BASE_URL",
            "REST_ENABLE_SSL_VERIFY",
            "REST_TIMEOUT_MS",
            "REST_RESPONSE_SIZE_LIMIT",
            "AUTH_BASIC_USERNAME",
            "AUTH_BASIC_PASSWORD",
            "AUTH_BEARER",
            "AUTH_APIKEY_HEADER_NAME",
            "AUTH_APIKEY_VALUE",
            "HEADER_X_Custom",
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_client_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("REST_BASE_URL", "https://api.example.com");
            std::env::set_var("REST_ENABLE_SSL_VERIFY", "false");
            std::env::set_var("REST_RESPONSE_SIZE_LIMIT", "2048");
            std::env::set_var("HEADER_X_Custom", "yes");
        }
        let config = Config::from_env();
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("https://api.example.com")
        );
        assert!(!config.client.ssl_verify);
        assert_eq!(config.client.response_size_limit, 2048);
        assert_eq!(
            config.client.default_headers.get("X-Custom").map(String::as_str),
            Some("yes")
        );
        clear_env();
    }

    #[test]
    fn test_client_config_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        let config = Config::from_env();
        assert!(config.client.base_url.is_none());
        assert!(config.client.ssl_verify);
        assert_eq!(config.client.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(
            config.client.response_size_limit,
            DEFAULT_RESPONSE_SIZE_LIMIT
        );
    }

    #[test]
    fn test_basic_auth_wins_over_bearer() {
        let credentials = CredentialsConfig {
            basic_username: Some("user".to_string()),
            basic_password: Some("pass".to_string()),
            bearer_token: Some("token123".to_string()),
            ..Default::default()
        };
        // base64("user:pass") = dXNlcjpwYXNz
        assert_eq!(
            credentials.authorization_header().as_deref(),
            Some("Basic dXNlcjpwYXNz")
        );
    }

    #[test]
    fn test_bearer_token_gets_scheme_prefix() {
        let credentials = CredentialsConfig {
            bearer_token: Some("token123".to_string()),
            ..Default::default()
        };
        assert_eq!(
            credentials.authorization_header().as_deref(),
            Some("Bearer token123")
        );

        let prefixed = CredentialsConfig {
            bearer_token: Some("Bearer already".to_string()),
            ..Default::default()
        };
        assert_eq!(
            prefixed.authorization_header().as_deref(),
            Some("Bearer already")
        );
    }

    #[test]
    fn test_no_credentials_means_no_header() {
        let credentials = CredentialsConfig::default();
        assert!(credentials.authorization_header().is_none());
        assert!(credentials.api_key_header().is_none());
    }

    #[test]
    fn test_api_key_requires_name_and_value() {
        let partial = CredentialsConfig {
            apikey_header_name: Some("X-Api-Key".to_string()),
            ..Default::default()
        };
        assert!(partial.api_key_header().is_none());

        let full = CredentialsConfig {
            apikey_header_name: Some("X-Api-Key".to_string()),
            apikey_value: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(
            full.api_key_header(),
            Some(("X-Api-Key".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let credentials = CredentialsConfig {
            basic_username: Some("user".to_string()),
            basic_password: Some("super_secret".to_string()),
            bearer_token: Some("very_secret_token".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", credentials);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret"));
        assert!(!debug_str.contains("very_secret_token"));
    }
}
