//! Parameter types for Odoo MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchRecordsParams {
    #[schemars(description = "Technical model name, e.g. 'res.partner' or 'sale.order'")]
    pub model: String,

    #[schemars(
        description = "Odoo domain as a list of conditions, e.g. [[\"is_company\", \"=\", true]]. Empty matches all records"
    )]
    #[serde(default)]
    pub domain: Option<Vec<Value>>,

    #[schemars(description = "Fields to return (optional, defaults to all fields)")]
    #[serde(default)]
    pub fields: Option<Vec<String>>,

    #[schemars(description = "Maximum number of records (optional, server default applies)")]
    #[serde(default)]
    pub limit: Option<u32>,

    #[schemars(description = "Number of records to skip (optional)")]
    #[serde(default)]
    pub offset: Option<u32>,

    #[schemars(description = "Sort order, e.g. 'name asc, id desc' (optional)")]
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetRecordParams {
    #[schemars(description = "Technical model name, e.g. 'res.partner'")]
    pub model: String,

    #[schemars(description = "Database id of the record")]
    pub id: i64,

    #[schemars(description = "Fields to return (optional, defaults to all fields)")]
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CountRecordsParams {
    #[schemars(description = "Technical model name, e.g. 'res.partner'")]
    pub model: String,

    #[schemars(description = "Odoo domain to count (optional, counts all records)")]
    #[serde(default)]
    pub domain: Option<Vec<Value>>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListModelsParams {
    #[schemars(
        description = "Case-insensitive text matched against model technical names and labels (optional)"
    )]
    #[serde(default)]
    pub filter: Option<String>,

    #[schemars(description = "Maximum number of models (optional, server default applies)")]
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetModelFieldsParams {
    #[schemars(description = "Technical model name, e.g. 'res.partner'")]
    pub model: String,

    #[schemars(
        description = "Field attributes to return, e.g. [\"string\", \"type\", \"required\"] (optional, defaults to a compact set)"
    )]
    #[serde(default)]
    pub attributes: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateRecordParams {
    #[schemars(description = "Technical model name, e.g. 'res.partner'")]
    pub model: String,

    #[schemars(description = "Field values of the new record, e.g. {\"name\": \"Acme\"}")]
    pub values: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateRecordParams {
    #[schemars(description = "Technical model name, e.g. 'res.partner'")]
    pub model: String,

    #[schemars(description = "Database ids of the records to update")]
    pub ids: Vec<i64>,

    #[schemars(description = "Field values to write on every record")]
    pub values: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteRecordParams {
    #[schemars(description = "Technical model name, e.g. 'res.partner'")]
    pub model: String,

    #[schemars(description = "Database ids of the records to delete")]
    pub ids: Vec<i64>,
}
