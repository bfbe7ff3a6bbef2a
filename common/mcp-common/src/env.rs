//! Environment value parsing
//!
//! Strict parsers for the string settings MCP servers take from their
//! environment. A value that is present but malformed is always reported
//! back to the caller, never coerced to a default.

use std::str::FromStr;

/// Error produced while interpreting an environment value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    /// A required variable is unset or blank
    #[error("{key} is required but not set")]
    Missing { key: String },

    /// A boolean flag holds something other than `true` / `false`
    #[error("{key} must be 'true' or 'false', got '{value}'")]
    InvalidFlag { key: String, value: String },

    /// A numeric setting does not parse
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: String, value: String },
}

/// Trim a raw value, treating blank strings as unset
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Drop blank values but keep the rest byte for byte
///
/// For secrets and login names, where surrounding whitespace may be part
/// of the value.
pub fn present(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

/// Require a value to be present and non-blank, trimmed
pub fn require(key: &str, raw: Option<String>) -> Result<String, EnvError> {
    non_empty(raw).ok_or_else(|| missing(key))
}

/// Require a value to be present and non-blank, kept verbatim
pub fn require_verbatim(key: &str, raw: Option<String>) -> Result<String, EnvError> {
    present(raw).ok_or_else(|| missing(key))
}

fn missing(key: &str) -> EnvError {
    EnvError::Missing {
        key: key.to_string(),
    }
}

/// Parse a boolean flag
///
/// Accepts `true` and `false` in any letter case. Blank or unset yields
/// `Ok(None)` so the caller can apply its own default.
pub fn parse_flag(key: &str, raw: Option<String>) -> Result<Option<bool>, EnvError> {
    let Some(value) = non_empty(raw) else {
        return Ok(None);
    };

    if value.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if value.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(EnvError::InvalidFlag {
            key: key.to_string(),
            value,
        })
    }
}

/// Parse an unsigned number, blank or unset yields `Ok(None)`
pub fn parse_number<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>, EnvError> {
    let Some(value) = non_empty(raw) else {
        return Ok(None);
    };

    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| EnvError::InvalidNumber {
            key: key.to_string(),
            value,
        })
}
