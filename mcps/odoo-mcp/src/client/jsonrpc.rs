//! JSON-RPC client for Odoo
//!
//! Posts JSON-RPC 2.0 envelopes to `<url>/jsonrpc`. The uid is fetched with
//! `common.login` on first use and reused for every later call.
//! See: https://www.odoo.com/documentation/17.0/developer/reference/external_api.html

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::OnceCell;

use super::OdooClient;
use crate::config::OdooConfig;
use crate::error::OdooError;

/// Odoo client over the `/jsonrpc` endpoint
pub struct JsonRpcClient {
    http: Client,
    endpoint: String,
    config: OdooConfig,
    uid: OnceCell<i64>,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
    data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorData {
    message: Option<String>,
}

impl JsonRpcClient {
    pub fn new(config: OdooConfig) -> Result<Self, OdooError> {
        let http = Client::builder()
            .user_agent(concat!("odoo-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/jsonrpc", config.url),
            config,
            uid: OnceCell::new(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Call `service.method(*args)` on the server
    async fn call(&self, service: &str, method: &str, args: Vec<Value>) -> Result<Value, OdooError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": { "service": service, "method": method, "args": args },
            "id": id,
        });

        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OdooError::Status { status, body });
        }

        let envelope: RpcResponse = response.json().await?;
        decode_envelope(envelope)
    }

    /// Authenticate once and cache the uid
    async fn uid(&self) -> Result<i64, OdooError> {
        self.uid
            .get_or_try_init(|| async {
                let result = self
                    .call(
                        "common",
                        "login",
                        vec![
                            json!(self.config.database),
                            json!(self.config.username),
                            json!(self.config.password),
                        ],
                    )
                    .await?;

                let uid = result.as_i64().ok_or_else(|| OdooError::AuthenticationFailed {
                    username: self.config.username.clone(),
                    database: self.config.database.clone(),
                })?;
                tracing::info!(uid, database = %self.config.database, "Authenticated with Odoo");
                Ok::<_, OdooError>(uid)
            })
            .await
            .copied()
    }
}

fn decode_envelope(envelope: RpcResponse) -> Result<Value, OdooError> {
    if let Some(error) = envelope.error {
        // data.message carries the server-side exception text, the outer
        // message is usually just "Odoo Server Error"
        let message = error.data.and_then(|d| d.message).unwrap_or(error.message);
        return Err(OdooError::Rpc { message });
    }

    envelope
        .result
        .ok_or_else(|| OdooError::InvalidResponse("response has neither result nor error".into()))
}

#[async_trait]
impl OdooClient for JsonRpcClient {
    fn config(&self) -> &OdooConfig {
        &self.config
    }

    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> Result<Value, OdooError> {
        let uid = self.uid().await?;

        tracing::debug!(model, method, "execute_kw");

        self.call(
            "object",
            "execute_kw",
            vec![
                json!(self.config.database),
                json!(uid),
                json!(self.config.password),
                json!(model),
                json!(method),
                Value::Array(args),
                Value::Object(kwargs),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(raw: Value) -> RpcResponse {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_endpoint_from_config() {
        let config = OdooConfig::new("http://localhost:8069", "test_db", "admin", "admin");
        let client = JsonRpcClient::new(config).unwrap();
        assert_eq!(client.endpoint, "http://localhost:8069/jsonrpc");
        assert!(!client.config().read_only);
    }

    #[test]
    fn test_decode_result() {
        let value = decode_envelope(envelope(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [{ "id": 3, "name": "Gemini Furniture" }]
        })))
        .unwrap();
        assert_eq!(value[0]["id"], 3);
    }

    #[test]
    fn test_decode_error_prefers_data_message() {
        let err = decode_envelope(envelope(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": { "name": "odoo.exceptions.AccessError", "message": "You are not allowed to modify 'Contact'" }
            }
        })))
        .unwrap_err();
        assert!(
            matches!(err, OdooError::Rpc { ref message } if message == "You are not allowed to modify 'Contact'")
        );
    }

    #[test]
    fn test_decode_error_without_data() {
        let err = decode_envelope(envelope(json!({
            "error": { "code": -32601, "message": "Method not found" }
        })))
        .unwrap_err();
        assert!(matches!(err, OdooError::Rpc { ref message } if message == "Method not found"));
    }

    #[test]
    fn test_decode_empty_envelope() {
        let err = decode_envelope(envelope(json!({ "jsonrpc": "2.0", "id": 3 }))).unwrap_err();
        assert!(matches!(err, OdooError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) on localhost is closed on any sane test machine
        let mut config = OdooConfig::new("http://127.0.0.1:9", "test_db", "admin", "admin");
        config.timeout_secs = 2;
        let client = JsonRpcClient::new(config).unwrap();

        let err = client
            .execute_kw("res.partner", "search_count", vec![json!([])], Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OdooError::Http(_)));
        assert!(client.uid.get().is_none());
    }
}
