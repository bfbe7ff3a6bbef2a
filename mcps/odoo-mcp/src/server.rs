//! MCP Server implementation for Odoo
//!
//! Tools delegate to the handlers module. `tools/list` is answered from
//! the registry's filtered view rather than the raw router, so read-only
//! deployments never advertise the write tools.

use std::sync::Arc;

use mcp_common::{async_trait, EmbeddableError, EmbeddableMcp, EmbeddableResult};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, RoleServer,
};
use serde_json::Value;

use crate::client::{JsonRpcClient, OdooClient};
use crate::config::OdooConfig;
use crate::error::OdooError;
use crate::handlers;
use crate::params::*;
use crate::registry;

/// The Odoo MCP Server
#[derive(Clone)]
pub struct OdooMcpServer {
    client: Arc<dyn OdooClient>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl OdooMcpServer {
    /// Create a server around an existing client
    pub fn new(client: Arc<dyn OdooClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server talking JSON-RPC to the configured Odoo instance
    pub fn from_config(config: OdooConfig) -> Result<Self, OdooError> {
        tracing::info!(
            url = %config.url,
            database = %config.database,
            username = %config.username,
            mode = config.mode(),
            "Configuring Odoo client"
        );
        let client = JsonRpcClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Load configuration from the environment and settings file
    ///
    /// Fails before any tool can be listed when a required setting is
    /// missing or malformed.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = OdooConfig::load()?;
        Ok(Self::from_config(config)?)
    }

    // ========================================================================
    // Read Tools
    // ========================================================================

    #[tool(
        description = "Search records of an Odoo model with a domain filter. Returns matching records with the requested fields."
    )]
    async fn search_records(
        &self,
        Parameters(params): Parameters<SearchRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::search_records(self.client.as_ref(), params).await
    }

    #[tool(description = "Read a single Odoo record by model and id")]
    async fn get_record(
        &self,
        Parameters(params): Parameters<GetRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_record(self.client.as_ref(), params).await
    }

    #[tool(description = "Count records of an Odoo model matching a domain")]
    async fn count_records(
        &self,
        Parameters(params): Parameters<CountRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::count_records(self.client.as_ref(), params).await
    }

    #[tool(
        description = "List installed Odoo models (technical name and label), optionally filtered by text"
    )]
    async fn list_models(
        &self,
        Parameters(params): Parameters<ListModelsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_models(self.client.as_ref(), params).await
    }

    #[tool(description = "Describe the fields of an Odoo model: label, type, required, relation")]
    async fn get_model_fields(
        &self,
        Parameters(params): Parameters<GetModelFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_model_fields(self.client.as_ref(), params).await
    }

    // ========================================================================
    // Write Tools (hidden in read-only mode)
    // ========================================================================

    #[tool(description = "Create a record in an Odoo model. Returns the new record id.")]
    async fn create_record(
        &self,
        Parameters(params): Parameters<CreateRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_record(self.client.as_ref(), params).await
    }

    #[tool(description = "Update field values on one or more Odoo records")]
    async fn update_record(
        &self,
        Parameters(params): Parameters<UpdateRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::update_record(self.client.as_ref(), params).await
    }

    #[tool(description = "Delete one or more Odoo records")]
    async fn delete_record(
        &self,
        Parameters(params): Parameters<DeleteRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_record(self.client.as_ref(), params).await
    }
}

impl OdooMcpServer {
    /// Every tool the server defines, regardless of mode
    pub fn catalog() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    /// Configuration held by the client
    pub fn config(&self) -> &OdooConfig {
        self.client.config()
    }

    /// Tools callers may see under the current configuration
    pub fn visible_tools(&self) -> Vec<Tool> {
        registry::visible_tools(self.tool_router.list_all(), self.config())
    }

    fn instructions(&self) -> String {
        let config = self.config();
        let mut text = format!(
            "Odoo MCP server for database '{}' at {}. Currently in {} mode. \
             Use list_models and get_model_fields to discover data, \
             search_records, count_records and get_record to read it.",
            config.database,
            config.url,
            config.mode()
        );
        if !config.read_only {
            text.push_str(" create_record, update_record and delete_record modify records.");
        }
        text
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl rmcp::ServerHandler for OdooMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.visible_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if !registry::is_visible(&request.name, self.config()) {
            tracing::warn!(tool = %request.name, "Refusing hidden tool in read-only mode");
            return Err(McpError::invalid_request(
                format!("tool '{}' is not available in read-only mode", request.name),
                None,
            ));
        }
        let context = ToolCallContext::new(self, request, context);
        self.tool_router.call(context).await
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for OdooMcpServer {
    fn server_name(&self) -> &str {
        "odoo"
    }

    fn server_description(&self) -> Option<&str> {
        Some("Odoo MCP Server - search, read and (unless read-only) modify Odoo records.")
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.visible_tools()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        if !registry::is_visible(name, self.config()) {
            return Err(EmbeddableError::ToolNotFound(name.to_string()));
        }

        let client = self.client.as_ref();
        let result = match name {
            "search_records" => handlers::search_records(client, serde_json::from_value(params)?).await,
            "get_record" => handlers::get_record(client, serde_json::from_value(params)?).await,
            "count_records" => handlers::count_records(client, serde_json::from_value(params)?).await,
            "list_models" => handlers::list_models(client, serde_json::from_value(params)?).await,
            "get_model_fields" => {
                handlers::get_model_fields(client, serde_json::from_value(params)?).await
            }
            "create_record" => handlers::create_record(client, serde_json::from_value(params)?).await,
            "update_record" => handlers::update_record(client, serde_json::from_value(params)?).await,
            "delete_record" => handlers::delete_record(client, serde_json::from_value(params)?).await,
            _ => return Err(EmbeddableError::ToolNotFound(name.to_string())),
        };

        result.map_err(Into::into)
    }
}
