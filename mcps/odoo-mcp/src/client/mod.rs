//! Odoo client abstraction
//!
//! The server never talks HTTP itself. It holds an [`OdooClient`] and goes
//! through `execute_kw`, Odoo's generic "call method on model" entry point.
//! The typed helpers on the trait are thin wrappers that build the
//! positional and keyword arguments for the ORM methods the tools use.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::config::OdooConfig;
use crate::error::OdooError;

pub mod jsonrpc;

pub use jsonrpc::JsonRpcClient;

/// Arguments of a `search_read` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Odoo domain, e.g. `[["is_company", "=", true]]`
    pub domain: Vec<Value>,
    /// Fields to return, all fields when `None`
    pub fields: Option<Vec<String>>,
    pub limit: u32,
    pub offset: u32,
    /// Sort specification, e.g. `"name asc"`
    pub order: Option<String>,
}

/// Authenticated access to one Odoo database
///
/// Implementations own the [`OdooConfig`] they were built from. That copy
/// is the only place the server reads its mode from.
#[async_trait]
pub trait OdooClient: Send + Sync {
    /// Configuration this client was built from
    fn config(&self) -> &OdooConfig;

    /// Call `method` on `model` with positional `args` and keyword `kwargs`
    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> Result<Value, OdooError>;

    async fn search_read(&self, model: &str, query: &SearchQuery) -> Result<Vec<Value>, OdooError> {
        let mut kwargs = Map::new();
        if let Some(fields) = &query.fields {
            kwargs.insert("fields".into(), json!(fields));
        }
        kwargs.insert("limit".into(), json!(query.limit));
        kwargs.insert("offset".into(), json!(query.offset));
        if let Some(order) = &query.order {
            kwargs.insert("order".into(), json!(order));
        }

        let result = self
            .execute_kw(model, "search_read", vec![Value::Array(query.domain.clone())], kwargs)
            .await?;
        expect_records(result)
    }

    async fn read(
        &self,
        model: &str,
        ids: &[i64],
        fields: Option<&[String]>,
    ) -> Result<Vec<Value>, OdooError> {
        let mut kwargs = Map::new();
        if let Some(fields) = fields {
            kwargs.insert("fields".into(), json!(fields));
        }

        let result = self.execute_kw(model, "read", vec![json!(ids)], kwargs).await?;
        expect_records(result)
    }

    async fn search_count(&self, model: &str, domain: Vec<Value>) -> Result<u64, OdooError> {
        let result = self
            .execute_kw(model, "search_count", vec![Value::Array(domain)], Map::new())
            .await?;
        result
            .as_u64()
            .ok_or_else(|| OdooError::InvalidResponse(format!("expected a count, got {}", result)))
    }

    async fn fields_get(
        &self,
        model: &str,
        attributes: Option<&[String]>,
    ) -> Result<Value, OdooError> {
        let mut kwargs = Map::new();
        if let Some(attributes) = attributes {
            kwargs.insert("attributes".into(), json!(attributes));
        }
        self.execute_kw(model, "fields_get", vec![], kwargs).await
    }

    /// Create one record and return its id
    async fn create(&self, model: &str, values: Map<String, Value>) -> Result<i64, OdooError> {
        let result = self
            .execute_kw(model, "create", vec![Value::Object(values)], Map::new())
            .await?;
        let id = match &result {
            Value::Number(n) => n.as_i64(),
            // Odoo 17+ may answer a single-dict create with a one-element list
            Value::Array(ids) if ids.len() == 1 => ids[0].as_i64(),
            _ => None,
        };
        id.ok_or_else(|| OdooError::InvalidResponse(format!("expected a record id, got {}", result)))
    }

    async fn write(
        &self,
        model: &str,
        ids: &[i64],
        values: Map<String, Value>,
    ) -> Result<bool, OdooError> {
        let result = self
            .execute_kw(model, "write", vec![json!(ids), Value::Object(values)], Map::new())
            .await?;
        expect_bool(result)
    }

    async fn unlink(&self, model: &str, ids: &[i64]) -> Result<bool, OdooError> {
        let result = self
            .execute_kw(model, "unlink", vec![json!(ids)], Map::new())
            .await?;
        expect_bool(result)
    }
}

fn expect_records(value: Value) -> Result<Vec<Value>, OdooError> {
    match value {
        Value::Array(records) => Ok(records),
        other => Err(OdooError::InvalidResponse(format!(
            "expected a list of records, got {}",
            other
        ))),
    }
}

fn expect_bool(value: Value) -> Result<bool, OdooError> {
    value
        .as_bool()
        .ok_or_else(|| OdooError::InvalidResponse(format!("expected a boolean, got {}", value)))
}
