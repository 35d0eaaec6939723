//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
/// Every field is optional; a missing config file yields [`Config::default`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directories that workbook paths must resolve under.
    ///
    /// An empty list disables the restriction: tools may read any path the
    /// process itself can read.
    #[serde(default)]
    pub allowed_paths: Vec<PathBuf>,

    /// Row and result limits for the tools.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            allowed_paths: Vec::new(),
            limits: LimitsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.default_max_rows == 0 {
            return Err(ConfigError::Validation {
                message: "limits.default_max_rows must be at least 1".to_string(),
            });
        }
        if self.limits.max_preview_rows == 0 {
            return Err(ConfigError::Validation {
                message: "limits.max_preview_rows must be at least 1".to_string(),
            });
        }
        if self.limits.max_search_results == 0 {
            return Err(ConfigError::Validation {
                message: "limits.max_search_results must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Row and result limits applied by the tool handlers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Default row limit for `read_excel_file` when the caller omits
    /// `max_rows`. Default: 1000.
    #[serde(default = "default_max_rows")]
    pub default_max_rows: usize,

    /// Upper bound on `preview_rows` for `get_excel_summary`. Default: 20.
    #[serde(default = "default_max_preview_rows")]
    pub max_preview_rows: usize,

    /// Upper bound on `max_results` for `search_excel_data`. Default: 100.
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_max_rows: default_max_rows(),
            max_preview_rows: default_max_preview_rows(),
            max_search_results: default_max_search_results(),
        }
    }
}

const fn default_max_rows() -> usize {
    1000
}

const fn default_max_preview_rows() -> usize {
    20
}

const fn default_max_search_results() -> usize {
    100
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
