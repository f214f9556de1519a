//! REST POST tool definition.
//!
//! Sends an HTTP POST request through the shared request executor and
//! returns the response body, status and headers as a JSON text block.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

use super::common::{error_envelope, response_envelope};
use crate::core::config::Config;
use crate::core::executor::{HttpMethod, RequestExecutor, RequestSpec};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the REST POST tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestPostParams {
    /// Target endpoint.
    #[schemars(description = "Endpoint to call: an absolute URL, or a path resolved against REST_BASE_URL")]
    pub url: String,

    /// Request body, serialized as JSON unless contentType says otherwise.
    #[schemars(description = "Optional request body (any JSON value)")]
    pub body: Option<Value>,

    /// Additional request headers.
    #[schemars(description = "Optional additional request headers")]
    pub headers: Option<HashMap<String, String>>,

    /// Skip all configured authentication for this request.
    #[serde(default)]
    #[schemars(description = "When true, no Authorization or API key header is sent")]
    pub without_authorization: bool,

    /// Overrides the default application/json content type.
    #[schemars(description = "Optional Content-Type override (default: application/json)")]
    pub content_type: Option<String>,

    /// Query parameters appended to the URL.
    #[schemars(description = "Optional query parameters (values may be any JSON value)")]
    pub query_params: Option<HashMap<String, Value>>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// REST POST tool - performs an HTTP POST request against the target API.
pub struct RestPostTool;

impl RestPostTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "rest_post";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Execute an HTTP POST request. Accepts an optional JSON body, custom headers, a content type override, and query parameters. Returns the response body, status code, status text, and headers.";

    /// Execute the tool logic.
    ///
    /// Never returns an error: executor failures are logged and folded into
    /// the error envelope.
    pub async fn execute(
        params: &RestPostParams,
        executor: &dyn RequestExecutor,
        auth_token: Option<String>,
    ) -> CallToolResult {
        info!("POST {}", params.url);

        let spec = RequestSpec {
            url: params.url.clone(),
            method: HttpMethod::Post,
            body: params.body.clone(),
            headers: params.headers.clone(),
            without_authorization: params.without_authorization,
            content_type: params.content_type.clone(),
            query_params: params.query_params.clone(),
        };

        match executor.execute(spec, auth_token).await {
            Ok(response) => response_envelope(&response),
            Err(e) => {
                error!("POST {} failed: {}", params.url, e);
                error_envelope(&e)
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        executor: Arc<dyn RequestExecutor>,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: RestPostParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        let token = config.credentials.authorization_header();
        let result = Self::execute(&params, executor.as_ref(), token).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RestPostParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(executor: Arc<dyn RequestExecutor>, config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let executor = executor.clone();
            let config = config.clone();
            async move {
                let params: RestPostParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let token = config.credentials.authorization_header();
                Ok(Self::execute(&params, executor.as_ref(), token).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::rest::common::testing::{StubExecutor, result_text};
    use serde_json::json;

    fn minimal_params(url: &str) -> RestPostParams {
        serde_json::from_value(json!({ "url": url })).unwrap()
    }

    #[test]
    fn test_params_accept_camel_case_fields() {
        let params: RestPostParams = serde_json::from_value(json!({
            "url": "/users",
            "body": {"name": "ada"},
            "headers": {"x-trace": "1"},
            "withoutAuthorization": true,
            "contentType": "text/plain",
            "queryParams": {"dry_run": true}
        }))
        .unwrap();

        assert_eq!(params.url, "/users");
        assert!(params.without_authorization);
        assert_eq!(params.content_type.as_deref(), Some("text/plain"));
        assert_eq!(params.query_params.unwrap()["dry_run"], json!(true));
    }

    #[test]
    fn test_params_require_url() {
        let result: Result<RestPostParams, _> = serde_json::from_value(json!({
            "body": {"name": "ada"}
        }));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_method_is_always_post_and_optionals_stay_absent() {
        let stub = StubExecutor::succeeding(StubExecutor::created_response());
        let params = minimal_params("/users");

        RestPostTool::execute(&params, &stub, None).await;

        let (spec, token) = stub.last_call();
        assert_eq!(spec.method, HttpMethod::Post);
        assert!(spec.body.is_none());
        assert!(spec.headers.is_none());
        assert!(spec.content_type.is_none());
        assert!(spec.query_params.is_none());
        assert!(!spec.without_authorization);
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_success_envelope_round_trip() {
        let stub = StubExecutor::succeeding(StubExecutor::created_response());
        let params = minimal_params("https://api.example.com/items");

        let result = RestPostTool::execute(&params, &stub, None).await;
        assert!(!result.is_error.unwrap_or(false));

        let parsed: serde_json::Value = serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(
            parsed,
            json!({
                "response": {"ok": true},
                "status": 201,
                "statusText": "Created",
                "headers": {"x-id": "42"}
            })
        );
    }

    #[tokio::test]
    async fn test_auth_token_is_forwarded_unchanged() {
        let stub = StubExecutor::succeeding(StubExecutor::created_response());
        let params = minimal_params("/users");

        RestPostTool::execute(&params, &stub, Some("Bearer abc".to_string())).await;

        let (spec, token) = stub.last_call();
        assert!(!spec.without_authorization);
        assert_eq!(token.as_deref(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_without_authorization_flag_reaches_executor() {
        let stub = StubExecutor::succeeding(StubExecutor::created_response());
        let params: RestPostParams = serde_json::from_value(json!({
            "url": "/users",
            "withoutAuthorization": true
        }))
        .unwrap();

        RestPostTool::execute(&params, &stub, Some("Bearer abc".to_string())).await;

        let (spec, _) = stub.last_call();
        assert!(spec.without_authorization);
    }

    #[tokio::test]
    async fn test_executor_failure_becomes_error_envelope() {
        let stub = StubExecutor::failing("timeout");
        let params = minimal_params("/users");

        let result = RestPostTool::execute(&params, &stub, None).await;
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "Error: timeout");
    }

    #[tokio::test]
    async fn test_envelope_formatting_is_deterministic() {
        let stub = StubExecutor::succeeding(StubExecutor::created_response());
        let params = minimal_params("/users");

        let first = RestPostTool::execute(&params, &stub, None).await;
        let second = RestPostTool::execute(&params, &stub, None).await;
        assert_eq!(result_text(&first), result_text(&second));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_handler_rejects_missing_url() {
        let stub: Arc<dyn RequestExecutor> =
            Arc::new(StubExecutor::succeeding(StubExecutor::created_response()));
        let config = Arc::new(Config::default());

        let result = RestPostTool::http_handler(json!({}), stub, config).await;
        assert!(result.is_err());
    }
}
