//! Odoo MCP Server
//!
//! Serves Odoo search/read/write tools over stdio. Configure with the
//! `ODOO_*` environment variables; `ODOO_READ_ONLY=true` hides the write
//! tools.

use odoo_mcp::OdooMcpServer;

mcp_common::serve_stdio!(OdooMcpServer::from_env, "odoo_mcp");
