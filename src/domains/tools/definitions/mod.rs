//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod rest;

pub use rest::{
    RestDeleteParams, RestDeleteTool, RestGetParams, RestGetTool, RestPostParams, RestPostTool,
    RestPutParams, RestPutTool,
};
