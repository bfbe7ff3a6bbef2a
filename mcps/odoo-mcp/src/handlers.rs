//! Tool handlers
//!
//! Each handler validates its parameters, makes one client call and wraps
//! the answer as JSON. Write handlers refuse to run in read-only mode even
//! when reached directly, so the listing filter is never the only guard.

use mcp_common::{
    invalid_params, invalid_request, json_success, CallToolResult, IntoMcpError, McpError,
    ResultExt,
};
use serde_json::{json, Value};

use crate::client::{OdooClient, SearchQuery};
use crate::error::OdooError;
use crate::params::*;
use crate::registry::{ToolAccess, WRITE_TOOLS};

const DEFAULT_FIELD_ATTRIBUTES: &[&str] = &["string", "type", "required", "readonly", "relation"];

// ============================================================================
// Helper Functions
// ============================================================================

/// Reject empty or malformed technical model names
fn check_model(model: &str) -> Result<(), McpError> {
    let valid = !model.is_empty()
        && !model.starts_with('.')
        && !model.ends_with('.')
        && model
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(invalid_params(format!(
            "'{}' is not a valid model name (expected e.g. 'res.partner')",
            model
        )))
    }
}

fn check_ids(ids: &[i64]) -> Result<(), McpError> {
    if ids.is_empty() {
        return Err(invalid_params("ids cannot be empty"));
    }
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(invalid_params(format!("invalid record id {}", bad)));
    }
    Ok(())
}

/// Refuse `tool` when the client is configured read-only
pub fn ensure_writable(client: &dyn OdooClient, tool: &str) -> Result<(), McpError> {
    debug_assert_eq!(ToolAccess::of(tool), ToolAccess::Write);

    if client.config().read_only {
        tracing::warn!(tool, "Refused write tool in read-only mode");
        return Err(invalid_request(format!(
            "{} is disabled: server is in read-only mode (write tools: {})",
            tool,
            WRITE_TOOLS.join(", ")
        )));
    }
    Ok(())
}

// ============================================================================
// Read Handlers
// ============================================================================

pub async fn search_records(
    client: &dyn OdooClient,
    params: SearchRecordsParams,
) -> Result<CallToolResult, McpError> {
    check_model(&params.model)?;

    let query = SearchQuery {
        domain: params.domain.unwrap_or_default(),
        fields: params.fields,
        limit: params.limit.unwrap_or(client.config().default_limit),
        offset: params.offset.unwrap_or(0),
        order: params.order,
    };

    tracing::info!(model = %params.model, limit = query.limit, "search_records");

    let records = client.search_read(&params.model, &query).await.to_mcp_err()?;

    json_success(&json!({
        "model": params.model,
        "count": records.len(),
        "records": records,
    }))
}

pub async fn get_record(
    client: &dyn OdooClient,
    params: GetRecordParams,
) -> Result<CallToolResult, McpError> {
    check_model(&params.model)?;
    check_ids(&[params.id])?;

    let records = client
        .read(&params.model, &[params.id], params.fields.as_deref())
        .await
        .to_mcp_err()?;

    match records.into_iter().next() {
        Some(record) => json_success(&record),
        None => Err(OdooError::NotFound {
            model: params.model,
            id: params.id,
        }
        .into_mcp_error()),
    }
}

pub async fn count_records(
    client: &dyn OdooClient,
    params: CountRecordsParams,
) -> Result<CallToolResult, McpError> {
    check_model(&params.model)?;

    let count = client
        .search_count(&params.model, params.domain.unwrap_or_default())
        .await
        .to_mcp_err()?;

    json_success(&json!({ "model": params.model, "count": count }))
}

pub async fn list_models(
    client: &dyn OdooClient,
    params: ListModelsParams,
) -> Result<CallToolResult, McpError> {
    let domain: Vec<Value> = match params.filter.as_deref().map(str::trim) {
        Some(filter) if !filter.is_empty() => vec![
            json!("|"),
            json!(["model", "ilike", filter]),
            json!(["name", "ilike", filter]),
        ],
        _ => Vec::new(),
    };

    let query = SearchQuery {
        domain,
        fields: Some(vec!["model".to_string(), "name".to_string()]),
        limit: params.limit.unwrap_or(client.config().default_limit),
        offset: 0,
        order: Some("model asc".to_string()),
    };

    let models = client.search_read("ir.model", &query).await.to_mcp_err()?;

    json_success(&json!({ "count": models.len(), "models": models }))
}

pub async fn get_model_fields(
    client: &dyn OdooClient,
    params: GetModelFieldsParams,
) -> Result<CallToolResult, McpError> {
    check_model(&params.model)?;

    let attributes = params.attributes.unwrap_or_else(|| {
        DEFAULT_FIELD_ATTRIBUTES
            .iter()
            .map(|a| a.to_string())
            .collect()
    });

    let fields = client
        .fields_get(&params.model, Some(attributes.as_slice()))
        .await
        .to_mcp_err()?;

    json_success(&json!({ "model": params.model, "fields": fields }))
}

// ============================================================================
// Write Handlers
// ============================================================================

pub async fn create_record(
    client: &dyn OdooClient,
    params: CreateRecordParams,
) -> Result<CallToolResult, McpError> {
    ensure_writable(client, "create_record")?;
    check_model(&params.model)?;

    let id = client.create(&params.model, params.values).await.to_mcp_err()?;

    tracing::info!(model = %params.model, id, "Created record");
    json_success(&json!({ "model": params.model, "id": id }))
}

pub async fn update_record(
    client: &dyn OdooClient,
    params: UpdateRecordParams,
) -> Result<CallToolResult, McpError> {
    ensure_writable(client, "update_record")?;
    check_model(&params.model)?;
    check_ids(&params.ids)?;
    if params.values.is_empty() {
        return Err(invalid_params("values cannot be empty"));
    }

    let updated = client
        .write(&params.model, &params.ids, params.values)
        .await
        .to_mcp_err()?;

    tracing::info!(model = %params.model, ids = ?params.ids, "Updated records");
    json_success(&json!({ "model": params.model, "ids": params.ids, "updated": updated }))
}

pub async fn delete_record(
    client: &dyn OdooClient,
    params: DeleteRecordParams,
) -> Result<CallToolResult, McpError> {
    ensure_writable(client, "delete_record")?;
    check_model(&params.model)?;
    check_ids(&params.ids)?;

    let deleted = client.unlink(&params.model, &params.ids).await.to_mcp_err()?;

    tracing::info!(model = %params.model, ids = ?params.ids, "Deleted records");
    json_success(&json!({ "model": params.model, "ids": params.ids, "deleted": deleted }))
}
