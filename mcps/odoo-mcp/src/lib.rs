//! Odoo MCP Library
//!
//! Exposes Odoo records through MCP tools. With `ODOO_READ_ONLY=true` the
//! write tools (`create_record`, `update_record`, `delete_record`) are
//! neither listed nor callable.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use odoo_mcp::{JsonRpcClient, OdooConfig, OdooMcpServer};
//!
//! let config = OdooConfig::new("http://localhost:8069", "test_db", "admin", "admin")
//!     .with_read_only(true);
//! let server = OdooMcpServer::new(Arc::new(JsonRpcClient::new(config)?));
//! let tools = server.visible_tools();
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod params;
pub mod registry;
pub mod server;

// Re-export main server type
pub use server::OdooMcpServer;

pub use client::{JsonRpcClient, OdooClient, SearchQuery};
pub use config::OdooConfig;
pub use error::{ConfigError, OdooError};

// Re-export parameter types for direct API usage
pub use params::*;
