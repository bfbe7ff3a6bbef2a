//! Read-only mode tests for odoo-mcp
//!
//! Drive the public library API, and the MCP protocol over an in-memory
//! duplex stream, with an offline client: no Odoo instance is needed. Each test builds its own configuration and server, so tests
//! can run in parallel without touching the process environment.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mcp_common::{async_trait, EmbeddableError, EmbeddableMcp};
use odoo_mcp::config::ConfigFile;
use odoo_mcp::{
    handlers, ConfigError, DeleteRecordParams, OdooClient, OdooConfig, OdooError, OdooMcpServer,
};
use rmcp::model::{CallToolRequestParam, ErrorCode};
use rmcp::service::RunningService;
use rmcp::{RoleClient, ServiceError, ServiceExt};
use serde_json::{json, Map, Value};

const WRITE_TOOLS: [&str; 3] = ["create_record", "update_record", "delete_record"];

/// Client that never reaches a network and counts how often it was asked
struct OfflineClient {
    config: OdooConfig,
    calls: AtomicUsize,
}

impl OfflineClient {
    fn new(config: OdooConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl OdooClient for OfflineClient {
    fn config(&self) -> &OdooConfig {
        &self.config
    }

    async fn execute_kw(
        &self,
        _model: &str,
        _method: &str,
        _args: Vec<Value>,
        _kwargs: Map<String, Value>,
    ) -> Result<Value, OdooError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!([]))
    }
}

fn config(read_only: bool) -> OdooConfig {
    OdooConfig::new("http://localhost:8069", "test_db", "admin", "admin").with_read_only(read_only)
}

fn tool_names(server: &OdooMcpServer) -> Vec<String> {
    server.list_tools().iter().map(|t| t.name.to_string()).collect()
}

fn server(read_only: bool) -> OdooMcpServer {
    OdooMcpServer::new(OfflineClient::new(config(read_only)))
}

#[test]
fn read_write_mode_lists_write_tools() {
    let names = tool_names(&server(false));
    for tool in WRITE_TOOLS {
        assert!(names.iter().any(|n| n == tool), "{} should be listed", tool);
    }
}

#[test]
fn read_only_mode_hides_write_tools() {
    let names = tool_names(&server(true));
    for tool in WRITE_TOOLS {
        assert!(!names.iter().any(|n| n == tool), "{} should be hidden", tool);
    }
    for tool in ["search_records", "get_record", "list_models"] {
        assert!(names.iter().any(|n| n == tool), "{} should be listed", tool);
    }
}

#[test]
fn read_only_scenario_from_environment_values() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ODOO_URL", "http://localhost:8069"),
        ("ODOO_DB", "test_db"),
        ("ODOO_USERNAME", "admin"),
        ("ODOO_PASSWORD", "admin"),
        ("ODOO_READ_ONLY", "true"),
    ]);
    let config = OdooConfig::resolve(ConfigFile::default(), |key| {
        vars.get(key).map(|v| v.to_string())
    })
    .unwrap();
    assert!(config.read_only);

    let server = OdooMcpServer::new(OfflineClient::new(config));
    assert_eq!(
        tool_names(&server),
        vec!["count_records", "get_model_fields", "get_record", "list_models", "search_records"]
    );
}

#[test]
fn listing_is_idempotent() {
    for read_only in [false, true] {
        let server = server(read_only);
        assert_eq!(tool_names(&server), tool_names(&server));
    }
}

#[test]
fn toggling_mode_changes_only_write_tools() {
    let read_write: BTreeSet<String> = tool_names(&server(false)).into_iter().collect();
    let read_only: BTreeSet<String> = tool_names(&server(true)).into_iter().collect();

    assert!(read_only.is_subset(&read_write));

    let removed: BTreeSet<&str> = read_write.difference(&read_only).map(String::as_str).collect();
    assert_eq!(removed, BTreeSet::from(WRITE_TOOLS));
}

#[test]
fn missing_configuration_fails_before_listing() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ODOO_DB", "test_db"),
        ("ODOO_USERNAME", "admin"),
        ("ODOO_PASSWORD", "admin"),
    ]);
    let err = OdooConfig::resolve(ConfigFile::default(), |key| {
        vars.get(key).map(|v| v.to_string())
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::Missing(ref key) if key == "ODOO_URL"));
}

#[test]
fn malformed_read_only_flag_is_rejected() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ODOO_URL", "http://localhost:8069"),
        ("ODOO_DB", "test_db"),
        ("ODOO_USERNAME", "admin"),
        ("ODOO_PASSWORD", "admin"),
        ("ODOO_READ_ONLY", "enabled"),
    ]);
    let err = OdooConfig::resolve(ConfigFile::default(), |key| {
        vars.get(key).map(|v| v.to_string())
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBool { .. }));
}

#[tokio::test]
async fn write_tool_call_in_read_only_mode_never_reaches_odoo() {
    let client = OfflineClient::new(config(true));
    let server = OdooMcpServer::new(client.clone());

    let result = server
        .call_tool("delete_record", json!({ "model": "res.partner", "ids": [1] }))
        .await;
    assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));

    let direct = handlers::delete_record(
        client.as_ref(),
        DeleteRecordParams {
            model: "res.partner".to_string(),
            ids: vec![1],
        },
    )
    .await;
    assert!(direct.unwrap_err().message.contains("read-only mode"));

    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn read_tool_call_in_read_only_mode_reaches_odoo() {
    let client = OfflineClient::new(config(true));
    let server = OdooMcpServer::new(client.clone());

    server
        .call_tool("search_records", json!({ "model": "res.partner" }))
        .await
        .unwrap();
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_listings_agree() {
    let server = server(true);
    let expected = tool_names(&server);

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let server = server.clone();
            tokio::spawn(async move { tool_names(&server) })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), expected);
    }
}

// ============================================================================
// MCP protocol
// ============================================================================

/// Serve `server` on one end of a duplex stream and connect a client to the other
async fn connect(server: OdooMcpServer) -> RunningService<RoleClient, ()> {
    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    tokio::spawn(async move {
        if let Ok(running) = server.serve(server_io).await {
            let _ = running.waiting().await;
        }
    });
    ().serve(client_io).await.unwrap()
}

fn call(name: &'static str, arguments: Value) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.into(),
        arguments: arguments.as_object().cloned(),
        task: None,
    }
}

#[tokio::test]
async fn protocol_tools_list_follows_mode() {
    let peer = connect(server(true)).await;
    let listed = peer.list_tools(Default::default()).await.unwrap();
    let names: Vec<String> = listed.tools.iter().map(|t| t.name.to_string()).collect();
    assert_eq!(
        names,
        vec!["count_records", "get_model_fields", "get_record", "list_models", "search_records"]
    );
    peer.cancel().await.unwrap();

    let peer = connect(server(false)).await;
    let listed = peer.list_tools(Default::default()).await.unwrap();
    assert_eq!(listed.tools.len(), 8);
    for tool in WRITE_TOOLS {
        assert!(listed.tools.iter().any(|t| t.name == tool), "{} should be listed", tool);
    }
    peer.cancel().await.unwrap();
}

#[tokio::test]
async fn protocol_write_call_in_read_only_mode_is_invalid_request() {
    let client = OfflineClient::new(config(true));
    let peer = connect(OdooMcpServer::new(client.clone())).await;

    let err = peer
        .call_tool(call("delete_record", json!({ "model": "res.partner", "ids": [1] })))
        .await
        .unwrap_err();
    match err {
        ServiceError::McpError(error) => {
            assert_eq!(error.code, ErrorCode::INVALID_REQUEST);
            assert!(error.message.contains("delete_record"));
            assert!(error.message.contains("read-only mode"));
        }
        other => panic!("expected an MCP error, got {:?}", other),
    }
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);

    peer.cancel().await.unwrap();
}

#[tokio::test]
async fn protocol_read_call_in_read_only_mode_reaches_odoo() {
    let client = OfflineClient::new(config(true));
    let peer = connect(OdooMcpServer::new(client.clone())).await;

    let result = peer
        .call_tool(call("search_records", json!({ "model": "res.partner" })))
        .await
        .unwrap();
    assert!(!result.is_error.unwrap_or(false));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    peer.cancel().await.unwrap();
}
