//! Tool visibility policy
//!
//! The full catalog is fixed by the server's `#[tool_router]` impl. What a
//! caller may see and call is a filtered view of it that depends only on
//! [`OdooConfig::read_only`]:
//!
//! - read tools are always visible
//! - write tools ([`WRITE_TOOLS`]) are hidden and refused in read-only mode
//!
//! The view is recomputed on every request and sorted by name so listings
//! are reproducible.

use rmcp::model::Tool;

use crate::config::OdooConfig;

/// Tools that change data in Odoo
pub const WRITE_TOOLS: &[&str] = &["create_record", "update_record", "delete_record"];

/// Whether a tool reads or writes Odoo data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAccess {
    Read,
    Write,
}

impl ToolAccess {
    /// Classify a tool by name
    pub fn of(name: &str) -> Self {
        if WRITE_TOOLS.contains(&name) {
            ToolAccess::Write
        } else {
            ToolAccess::Read
        }
    }
}

/// Whether `name` may be listed and called under `config`
pub fn is_visible(name: &str, config: &OdooConfig) -> bool {
    !config.read_only || ToolAccess::of(name) == ToolAccess::Read
}

/// Filter `catalog` down to the tools visible under `config`, sorted by name
pub fn visible_tools(catalog: impl IntoIterator<Item = Tool>, config: &OdooConfig) -> Vec<Tool> {
    let mut tools: Vec<Tool> = catalog
        .into_iter()
        .filter(|tool| is_visible(&tool.name, config))
        .collect();
    tools.sort_by(|a, b| a.name.cmp(&b.name));
    tools
}
