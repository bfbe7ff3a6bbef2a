//! In-process access to an MCP server
//!
//! [`EmbeddableMcp`] lets a host list and call a server's tools directly,
//! without a transport. It sees the same tool set a stdio client would:
//! servers that hide tools depending on their mode hide them here too.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use odoo_mcp::{JsonRpcClient, OdooConfig, OdooMcpServer};
//!
//! let server = OdooMcpServer::new(Arc::new(JsonRpcClient::new(OdooConfig::load()?)?));
//!
//! // List the tools visible in the current mode
//! let tools = server.list_tools();
//! println!("Available: {:?}", tools.iter().map(|t| &t.name).collect::<Vec<_>>());
//!
//! // Call a tool directly
//! let result = server
//!     .call_tool("search_records", serde_json::json!({ "model": "res.partner", "limit": 5 }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embedded tool calls
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// No visible tool has this name
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not deserialize into the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool ran and returned a protocol error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embedded tool calls
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server that can be driven in-process
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name as used in MCP configuration files
    fn server_name(&self) -> &str;

    /// Tools currently visible to callers
    fn list_tools(&self) -> Vec<Tool>;

    /// Call a visible tool with JSON arguments
    ///
    /// # Arguments
    ///
    /// * `name` - The tool name as returned by `list_tools`
    /// * `params` - JSON object containing the tool parameters
    ///
    /// # Returns
    ///
    /// The tool result on success, or an error if:
    /// - no visible tool has this name
    /// - the parameters do not deserialize
    /// - the tool itself fails
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Whether `name` is currently listed
    fn has_tool(&self, name: &str) -> bool {
        self.list_tools().iter().any(|t| t.name == name)
    }

    /// Optional one-line description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }
}
