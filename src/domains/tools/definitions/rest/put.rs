//! REST PUT tool definition.

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

/// Parameters for the REST PUT tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestPutParams {
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

/// REST PUT tool - performs an HTTP PUT request against the target API.
pub struct RestPutTool;

impl RestPutTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "rest_put";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Execute an HTTP PUT request. Accepts an optional JSON body, custom headers, a content type override, and query parameters. Returns the response body, status code, status text, and headers.";

    /// Execute the tool logic.
    pub async fn execute(
        params: &RestPutParams,
        executor: &dyn RequestExecutor,
        auth_token: Option<String>,
    ) -> CallToolResult {
        info!("PUT {}", params.url);

        let spec = RequestSpec {
            url: params.url.clone(),
            method: HttpMethod::Put,
            body: params.body.clone(),
            headers: params.headers.clone(),
            without_authorization: params.without_authorization,
            content_type: params.content_type.clone(),
            query_params: params.query_params.clone(),
        };

        match executor.execute(spec, auth_token).await {
            Ok(response) => response_envelope(&response),
            Err(e) => {
                error!("PUT {} failed: {}", params.url, e);
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
        let params: RestPutParams =
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
            input_schema: cached_schema_for_type::<RestPutParams>(),
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
                let params: RestPutParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let token = config.credentials.authorization_header();
                Ok(Self::execute(&params, executor.as_ref(), token).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::rest::common::testing::{StubExecutor, result_text};
    use serde_json::json;

    #[tokio::test]
    async fn test_method_is_always_put_and_body_is_forwarded() {
        let stub = StubExecutor::succeeding(StubExecutor::created_response());
        let params: RestPutParams = serde_json::from_value(json!({
            "url": "/items/7",
            "body": {"name": "updated"}
        }))
        .unwrap();

        RestPutTool::execute(&params, &stub, None).await;

        let (spec, _) = stub.last_call();
        assert_eq!(spec.method, HttpMethod::Put);
        assert_eq!(spec.body, Some(json!({"name": "updated"})));
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let stub = StubExecutor::succeeding(StubExecutor::created_response());
        let params: RestPutParams =
            serde_json::from_value(json!({"url": "/items/7"})).unwrap();

        let result = RestPutTool::execute(&params, &stub, None).await;
        assert!(!result.is_error.unwrap_or(false));

        let parsed: serde_json::Value = serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(parsed["statusText"], json!("Created"));
    }
}
