//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only wires them
//! together with the shared request executor.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;
use crate::core::executor::RequestExecutor;

use super::definitions::{RestDeleteTool, RestGetTool, RestPostTool, RestPutTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(
    config: Arc<Config>,
    executor: Arc<dyn RequestExecutor>,
) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(RestDeleteTool::create_route(
            executor.clone(),
            config.clone(),
        ))
        .with_route(RestGetTool::create_route(executor.clone(), config.clone()))
        .with_route(RestPostTool::create_route(executor.clone(), config.clone()))
        .with_route(RestPutTool::create_route(executor, config))
}

#[cfg(test)]
mod tests {
    use super::super::definitions::rest::common::testing::StubExecutor;
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    fn test_executor() -> Arc<dyn RequestExecutor> {
        Arc::new(StubExecutor::succeeding(StubExecutor::created_response()))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config(), test_executor());
        let tools = router.list_all();
        assert_eq!(tools.len(), 4);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"rest_get"));
        assert!(names.contains(&"rest_post"));
        assert!(names.contains(&"rest_put"));
        assert!(names.contains(&"rest_delete"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let registry = ToolRegistry::new(test_config(), test_executor());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(test_config(), test_executor());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
