//! Configuration file loading and parsing.
//!
//! This module handles loading the configuration file from disk and parsing
//! it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path specified via the `CONFIG_FILE` CLI argument
//! 2. Default location:
//!    - **Linux/macOS:** `~/.excel-mcp-server/config.json`
//!    - **Windows:** `%USERPROFILE%\.excel-mcp-server\config.json`
//!
//! An explicitly requested file must exist. A missing file at the default
//! location is not an error; the server starts with built-in defaults so it
//! can run out of the box from an MCP client configuration entry.

mod settings;

pub use settings::{Config, LimitsConfig, LoggingConfig};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.excel-mcp-server/`
/// - **Windows:** `%USERPROFILE%\.excel-mcp-server\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".excel-mcp-server"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location and
/// falls back to [`Config::default`] when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly requested file does not exist
/// - The file cannot be read
/// - The JSON is malformed or contains unknown fields
/// - A limit is set to zero
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => {
            let Some(default_path) = default_config_path() else {
                return Ok(Config::default());
            };
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Read {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: config_path.clone(),
        source: e,
    })?;

    config.validate()?;

    Ok(config)
}
