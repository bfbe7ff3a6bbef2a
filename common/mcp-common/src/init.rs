//! Server startup
//!
//! Tracing setup plus the `serve_stdio!` macro that generates a server's
//! `main`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for an MCP server
///
/// Logs go to stderr because stdout carries the MCP protocol. `RUST_LOG`
/// is honoured and `<crate_name>=info` is always added. Set
/// `LOG_FORMAT=json` for one JSON object per line.
///
/// # Arguments
///
/// * `crate_name` - Target name of the server crate (e.g. "odoo_mcp")
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("odoo_mcp")?;
/// tracing::info!("Starting server");
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Generate `main` for a stdio MCP server
///
/// `$constructor` is a fallible constructor path returning
/// `Result<Server, E>` where `E: Display + Into<anyhow::Error>`.
/// A constructor error is logged and returned from `main`, so the process
/// exits non-zero before the transport is opened.
///
/// # Arguments
///
/// * `$constructor` - Path to the server constructor, called once
/// * `$crate_name` - Crate name used for the log filter and startup message
///
/// The calling crate needs `tokio`, `tracing`, `anyhow` and `rmcp` as
/// dependencies.
///
/// # Example
///
/// ```rust,ignore
/// // src/main.rs
/// use odoo_mcp::OdooMcpServer;
///
/// mcp_common::serve_stdio!(OdooMcpServer::from_env, "odoo_mcp");
/// ```
#[macro_export]
macro_rules! serve_stdio {
    ($constructor:path, $crate_name:expr) => {
        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            use rmcp::ServiceExt;

            $crate::init_tracing($crate_name)?;

            tracing::info!(concat!("Starting ", $crate_name, " MCP Server"));

            let server = match $constructor() {
                Ok(server) => server,
                Err(e) => {
                    tracing::error!("Failed to initialize server: {}", e);
                    return Err(e.into());
                }
            };
            let service = server.serve(rmcp::transport::stdio()).await?;

            tracing::info!("Server running, waiting for requests...");

            service.waiting().await?;

            tracing::info!("Server shutting down");
            Ok(())
        }
    };
}
