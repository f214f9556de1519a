//! REST MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that lets an
//! agent exercise a REST API through a small set of request tools
//! (`rest_get`, `rest_post`, `rest_put`, `rest_delete`).
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Infrastructure - configuration, error handling, the outbound
//!   request executor, the main server handler, and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The MCP request tools executed on behalf of clients
//!
//! # Example
//!
//! ```rust,no_run
//! use rest_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
