//! Result helpers for MCP tool responses

use rmcp::{
    model::{CallToolResult, Content, RawContent},
    ErrorData as McpError,
};
use serde::Serialize;

/// Serialize `data` as pretty JSON into a successful tool result
///
/// # Arguments
///
/// * `data` - Any serializable value, typically a `serde_json::Value`
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::json_success;
///
/// async fn count_records(&self) -> Result<CallToolResult, McpError> {
///     let count = self.client.search_count("res.partner", vec![]).await.to_mcp_err()?;
///     json_success(&json!({ "model": "res.partner", "count": count }))
/// }
/// ```
pub fn json_success<T: Serialize + ?Sized>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Text of the first text content item, if any
///
/// Handy for callers embedding a server in-process that want the JSON
/// payload produced by [`json_success`].
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}
