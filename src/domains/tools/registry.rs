//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{RestDeleteTool, RestGetTool, RestPostTool, RestPutTool};
use super::error::ToolError;
use crate::core::config::Config;
use crate::core::executor::RequestExecutor;

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    executor: Arc<dyn RequestExecutor>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>, executor: Arc<dyn RequestExecutor>) -> Self {
        Self { config, executor }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            RestDeleteTool::NAME,
            RestGetTool::NAME,
            RestPostTool::NAME,
            RestPutTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            RestDeleteTool::to_tool(),
            RestGetTool::to_tool(),
            RestPostTool::to_tool(),
            RestPutTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let executor = self.executor.clone();
        let config = self.config.clone();

        let result = match name {
            RestDeleteTool::NAME => {
                RestDeleteTool::http_handler(arguments, executor, config).await
            }
            RestGetTool::NAME => RestGetTool::http_handler(arguments, executor, config).await,
            RestPostTool::NAME => RestPostTool::http_handler(arguments, executor, config).await,
            RestPutTool::NAME => RestPutTool::http_handler(arguments, executor, config).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };

        result.map_err(ToolError::invalid_arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::super::definitions::rest::common::testing::StubExecutor;
    use super::*;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(
            Arc::new(Config::default()),
            Arc::new(StubExecutor::succeeding(StubExecutor::created_response())),
        )
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = test_registry();
        let names = registry.tool_names();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"rest_get"));
        assert!(names.contains(&"rest_post"));
        assert!(names.contains(&"rest_put"));
        assert!(names.contains(&"rest_delete"));
    }

    #[test]
    fn test_get_all_tools_have_schemas() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 4);
        for tool in tools {
            assert!(tool.description.is_some());
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_rest_post() {
        let registry = test_registry();
        let result = tokio_test::block_on(
            registry.call_tool("rest_post", serde_json::json!({ "url": "/ping" })),
        );
        assert!(result.is_ok());
        assert_eq!(result.unwrap()["isError"], serde_json::json!(false));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = test_registry();
        let result =
            tokio_test::block_on(registry.call_tool("unknown", serde_json::json!({})));
        assert!(matches!(result.unwrap_err(), ToolError::NotFound(_)));
    }
}
