//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the request tools.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use super::executor::{HttpExecutor, RequestExecutor};
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls to the request tools, which share one request executor.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared outbound request executor.
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    executor: Arc<dyn RequestExecutor>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the outbound HTTP client cannot be built (e.g. an invalid
    /// default header configured via `HEADER_*`).
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let config = Arc::new(config);
        let executor: Arc<dyn RequestExecutor> =
            Arc::new(HttpExecutor::new(&config.client, &config.credentials)?);

        Ok(Self {
            tool_router: build_tool_router::<Self>(config.clone(), executor.clone()),
            config,
            executor,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration (for tool access).
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// This method uses the ToolRegistry to dispatch to the appropriate
    /// tool handler. Each tool's http_handler is defined in its own file
    /// under `domains/tools/definitions/`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.config.clone(), self.executor.clone());
        registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "REST API testing server. Use the rest_get, rest_post, rest_put and \
                 rest_delete tools to issue HTTP requests against the configured API."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_construction_with_defaults() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "rest-mcp-server");

        let tools = server.list_tools();
        assert_eq!(tools.len(), 4);
    }

    #[test]
    fn test_server_construction_rejects_bad_default_header() {
        let mut config = Config::default();
        config
            .client
            .default_headers
            .insert("not a header".to_string(), "v".to_string());
        assert!(McpServer::new(config).is_err());
    }
}
