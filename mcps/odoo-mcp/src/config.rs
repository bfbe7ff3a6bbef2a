//! Configuration for Odoo MCP Server
//!
//! Settings are layered, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file from `ODOO_CONFIG_PATH`, or `~/.binks/odoo.toml` if present
//! 3. `ODOO_*` environment variables
//!
//! The merged result is validated once and never changes afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use mcp_common::env::{non_empty, parse_flag, parse_number, present, require, require_verbatim};
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const ENV_URL: &str = "ODOO_URL";
pub const ENV_DATABASE: &str = "ODOO_DB";
pub const ENV_USERNAME: &str = "ODOO_USERNAME";
pub const ENV_PASSWORD: &str = "ODOO_PASSWORD";
pub const ENV_READ_ONLY: &str = "ODOO_READ_ONLY";
pub const ENV_TIMEOUT_SECS: &str = "ODOO_TIMEOUT_SECS";
pub const ENV_DEFAULT_LIMIT: &str = "ODOO_DEFAULT_LIMIT";
pub const ENV_CONFIG_PATH: &str = "ODOO_CONFIG_PATH";

fn default_timeout() -> u64 {
    30
}

fn default_limit() -> u32 {
    100
}

/// Validated connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct OdooConfig {
    /// Base URL of the Odoo instance, without trailing slash
    pub url: String,
    pub database: String,
    pub username: String,
    /// Password or API key
    pub password: String,
    /// Hide and refuse the record mutation tools
    pub read_only: bool,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Record limit applied when a search does not give one
    pub default_limit: u32,
}

/// Optional settings file, every key may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub read_only: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub default_limit: Option<u32>,
}

impl ConfigFile {
    /// Read and parse a settings file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `~/.binks/odoo.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".binks").join("odoo.toml"))
}

impl OdooConfig {
    /// Read-write configuration with default timeout and limit
    pub fn new(
        url: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
            read_only: false,
            timeout_secs: default_timeout(),
            default_limit: default_limit(),
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Load from the process environment and the settings file
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| std::env::var(key).ok(), default_config_path())
    }

    /// Load using `lookup` for environment values
    ///
    /// An explicit `ODOO_CONFIG_PATH` must point at a readable file.
    /// `fallback_path` is only used when it exists.
    pub fn load_from<F>(lookup: F, fallback_path: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match non_empty(lookup(ENV_CONFIG_PATH)) {
            Some(path) => {
                let path = PathBuf::from(path);
                tracing::info!("Loading config from {}={}", ENV_CONFIG_PATH, path.display());
                ConfigFile::read(&path)?
            }
            None => match fallback_path {
                Some(path) if path.exists() => {
                    tracing::info!("Loading config from {}", path.display());
                    ConfigFile::read(&path)?
                }
                _ => ConfigFile::default(),
            },
        };

        Self::resolve(file, lookup)
    }

    /// Merge a settings file with environment values and validate
    pub fn resolve<F>(file: ConfigFile, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, from_file: Option<String>| non_empty(lookup(key)).or(from_file);
        // Credentials are sent exactly as configured
        let pick_verbatim = |key: &str, from_file: Option<String>| present(lookup(key)).or(from_file);

        let url = require(ENV_URL, pick(ENV_URL, file.url))?;
        let database = require(ENV_DATABASE, pick(ENV_DATABASE, file.database))?;
        let username = require_verbatim(ENV_USERNAME, pick_verbatim(ENV_USERNAME, file.username))?;
        let password = require_verbatim(ENV_PASSWORD, pick_verbatim(ENV_PASSWORD, file.password))?;

        let read_only = parse_flag(ENV_READ_ONLY, lookup(ENV_READ_ONLY))?
            .or(file.read_only)
            .unwrap_or(false);
        let timeout_secs = parse_number::<u64>(ENV_TIMEOUT_SECS, lookup(ENV_TIMEOUT_SECS))?
            .or(file.timeout_secs)
            .unwrap_or_else(default_timeout);
        let default_limit = parse_number::<u32>(ENV_DEFAULT_LIMIT, lookup(ENV_DEFAULT_LIMIT))?
            .or(file.default_limit)
            .unwrap_or_else(default_limit);
        // A zero timeout fails every request and Odoo reads limit 0 as unlimited
        let timeout_secs = positive(ENV_TIMEOUT_SECS, timeout_secs)?;
        let default_limit = positive(ENV_DEFAULT_LIMIT, default_limit)?;

        Ok(Self {
            url: normalize_url(&url)?,
            database,
            username,
            password,
            read_only,
            timeout_secs,
            default_limit,
        })
    }

    /// Human-readable mode name
    pub fn mode(&self) -> &'static str {
        if self.read_only {
            "read-only"
        } else {
            "read-write"
        }
    }
}

fn positive<T: PartialEq + Default + fmt::Display>(key: &str, value: T) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn normalize_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

impl fmt::Debug for OdooConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdooConfig")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("read_only", &self.read_only)
            .field("timeout_secs", &self.timeout_secs)
            .field("default_limit", &self.default_limit)
            .finish()
    }
}
