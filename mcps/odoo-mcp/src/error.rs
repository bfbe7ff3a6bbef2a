//! Error types for the Odoo MCP server

use std::path::PathBuf;

use mcp_common::{internal_error, invalid_params, invalid_request, EnvError, IntoMcpError, McpError};
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Startup configuration could not be built
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(String),

    #[error("{key} must be 'true' or 'false', got '{value}'")]
    InvalidBool { key: String, value: String },

    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("'{value}' is not a valid http(s) URL: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl From<EnvError> for ConfigError {
    fn from(err: EnvError) -> Self {
        match err {
            EnvError::Missing { key } => ConfigError::Missing(key),
            EnvError::InvalidFlag { key, value } => ConfigError::InvalidBool { key, value },
            EnvError::InvalidNumber { key, value } => ConfigError::InvalidNumber { key, value },
        }
    }
}

// ============================================================================
// Client Errors
// ============================================================================

/// A call to Odoo failed
#[derive(Debug, Error)]
pub enum OdooError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Odoo returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication failed for user '{username}' on database '{database}'")]
    AuthenticationFailed { username: String, database: String },

    #[error("Odoo error: {message}")]
    Rpc { message: String },

    #[error("{model} record {id} not found")]
    NotFound { model: String, id: i64 },

    #[error("unexpected response from Odoo: {0}")]
    InvalidResponse(String),
}

impl IntoMcpError for OdooError {
    fn into_mcp_error(self) -> McpError {
        match &self {
            OdooError::AuthenticationFailed { .. } => invalid_request(self.to_string()),
            OdooError::NotFound { .. } => invalid_params(self.to_string()),
            OdooError::Http(_)
            | OdooError::Status { .. }
            | OdooError::Rpc { .. }
            | OdooError::InvalidResponse(_) => internal_error(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_env_error_mapping() {
        let err: ConfigError = EnvError::InvalidFlag {
            key: "ODOO_READ_ONLY".to_string(),
            value: "yes".to_string(),
        }
        .into();
        assert!(matches!(err, ConfigError::InvalidBool { ref key, .. } if key == "ODOO_READ_ONLY"));
        assert_eq!(
            err.to_string(),
            "ODOO_READ_ONLY must be 'true' or 'false', got 'yes'"
        );
    }

    #[test]
    fn test_odoo_error_codes() {
        let not_found = OdooError::NotFound {
            model: "res.partner".to_string(),
            id: 42,
        };
        let err = not_found.into_mcp_error();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("res.partner record 42 not found"));

        let rpc = OdooError::Rpc {
            message: "Invalid field 'colour' on model 'res.partner'".to_string(),
        };
        assert_eq!(rpc.into_mcp_error().code, ErrorCode::INTERNAL_ERROR);

        let auth = OdooError::AuthenticationFailed {
            username: "admin".to_string(),
            database: "test_db".to_string(),
        };
        assert_eq!(auth.into_mcp_error().code, ErrorCode::INVALID_REQUEST);
    }
}
