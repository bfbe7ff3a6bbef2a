//! MCP Common - shared plumbing for MCP servers
//!
//! - **Initialization**: `serve_stdio!` macro and [`init_tracing`]
//! - **Environment**: strict parsers for env-provided settings
//! - **Results**: helpers building `CallToolResult` responses
//! - **Errors**: conversions into MCP-compatible errors
//! - **Embeddable**: [`EmbeddableMcp`] for in-process execution
//!
//! ```rust,ignore
//! mcp_common::serve_stdio!(OdooMcpServer::from_env, "odoo_mcp");
//! ```

pub mod embeddable;
pub mod env;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use env::EnvError;
pub use error::{
    internal_error, invalid_params, invalid_request, IntoMcpError, ResultExt,
};
pub use init::init_tracing;
pub use result::{first_text, json_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
