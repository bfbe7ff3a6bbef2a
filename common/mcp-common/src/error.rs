//! Error helpers for MCP tool implementations
//!
//! Every tool returns `Result<CallToolResult, McpError>`. These helpers keep
//! the conversion from domain errors to protocol errors short at call sites.

use rmcp::ErrorData as McpError;

/// Conversion of a foreign error into an MCP error
///
/// Implement this for a server's own error enum to choose the protocol
/// error code per variant, then use [`ResultExt::to_mcp_err`] with `?`.
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::IntoMcpError;
/// use rmcp::ErrorData as McpError;
///
/// impl IntoMcpError for OdooError {
///     fn into_mcp_error(self) -> McpError {
///         match self {
///             OdooError::NotFound { .. } => McpError::invalid_params(self.to_string(), None),
///             other => McpError::internal_error(other.to_string(), None),
///         }
///     }
/// }
/// ```
pub trait IntoMcpError {
    /// Convert this error into an MCP error
    fn into_mcp_error(self) -> McpError;
}

/// Extension trait adding `to_mcp_err()` to any compatible `Result`
///
/// ```rust,ignore
/// use mcp_common::ResultExt;
///
/// let records = client.search_read(&params.model, &query).await.to_mcp_err()?;
/// ```
pub trait ResultExt<T> {
    /// Convert the error to an MCP error
    fn to_mcp_err(self) -> Result<T, McpError>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> Result<T, McpError> {
        self.map_err(|e| e.into_mcp_error())
    }
}

/// Internal error: the server or its upstream failed
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Invalid params: the caller sent arguments the tool cannot use
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// Invalid request: the call is well-formed but not permitted right now
///
/// Used for tools that exist in the catalog but are disabled by the
/// server's current mode.
pub fn invalid_request(message: impl Into<String>) -> McpError {
    McpError::invalid_request(message.into(), None)
}
