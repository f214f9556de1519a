//! Common utilities shared across the REST request tools.
//!
//! This module provides the response/error envelope formatting that every
//! request tool returns to the client.

use rmcp::model::{CallToolResult, Content};
use serde_json::json;

use crate::core::executor::ResponseData;

/// Wrap an executor response into the success envelope.
///
/// The single text content item is a pretty-printed JSON object with the
/// keys `response`, `status`, `statusText` and `headers`.
pub(crate) fn response_envelope(response: &ResponseData) -> CallToolResult {
    let body = json!({
        "response": response.data,
        "status": response.status,
        "statusText": response.status_text,
        "headers": response.headers,
    });

    match serde_json::to_string_pretty(&body) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_envelope(&e),
    }
}

/// Wrap a failure into the error envelope: one text item `Error: <message>`.
pub(crate) fn error_envelope(message: &impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
}
