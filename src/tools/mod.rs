//! Excel tool handlers and the tool registry.
//!
//! Tools are registered in an explicit [`ToolRegistry`]: an ordered map from
//! tool name to definition and handler function, populated once at startup.
//! The MCP layer consults the registry for `tools/list` and dispatches
//! `tools/call` through it; nothing registers itself via global state.
//!
//! Every handler returns a [`ToolResponse`] envelope. Failures inside a tool
//! (missing file, bad sheet name, out-of-range parameter) are reported in the
//! envelope's `error` field, never as JSON-RPC protocol errors.

mod get_excel_summary;
mod read_excel_file;
mod search_excel_data;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::config::LimitsConfig;

/// The success/error/data wrapper returned for every tool call.
///
/// Exactly one of `error`/`data` is populated: `error` when `success` is
/// false, `data` when it is true. Both fields are always present in the
/// serialised JSON (as `null` when unpopulated) so clients can rely on the
/// shape.
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    /// Whether the tool call succeeded.
    pub success: bool,
    /// Error description, `null` on success.
    pub error: Option<String>,
    /// Result payload, `null` on failure.
    pub data: Option<Value>,
}

impl ToolResponse {
    /// Creates a success envelope carrying `data`.
    #[must_use]
    pub const fn ok(data: Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// Creates an error envelope carrying the message.
    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: None,
        }
    }
}

/// Shared, read-only context passed to every tool handler.
///
/// Constructed once at startup from the loaded configuration.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Directories workbook paths must resolve under; empty means
    /// unrestricted.
    pub allowed_paths: Vec<PathBuf>,
    /// Row and result limits.
    pub limits: LimitsConfig,
}

impl ToolContext {
    /// Creates a context from configuration values.
    #[must_use]
    pub const fn new(allowed_paths: Vec<PathBuf>, limits: LimitsConfig) -> Self {
        Self {
            allowed_paths,
            limits,
        }
    }

    /// Validates that a file path is within one of the allowed directories.
    ///
    /// With no allowed paths configured, all paths are permitted. A path
    /// that does not exist passes here; the workbook layer reports it as
    /// not found without touching anything on disk.
    ///
    /// # Errors
    ///
    /// Returns an error message if the path resolves outside every allowed
    /// directory.
    pub fn validate_path(&self, file_path: &str) -> Result<(), String> {
        if self.allowed_paths.is_empty() {
            return Ok(());
        }

        let path = Path::new(file_path);
        if !path.exists() {
            return Ok(());
        }

        let canonical = path
            .canonicalize()
            .map_err(|e| format!("Failed to resolve path '{}': {e}", path.display()))?;

        for allowed in &self.allowed_paths {
            let Ok(canonical_allowed) = allowed.canonicalize() else {
                continue; // Skip non-existent allowed paths
            };
            if canonical.starts_with(&canonical_allowed) {
                return Ok(());
            }
        }

        // Do not expose the configured directories in the message
        Err("Access denied: path is outside the configured allowed directories".to_string())
    }
}

/// A tool definition for the `tools/list` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Signature every tool handler implements.
pub type ToolHandler = fn(&ToolContext, &Value) -> ToolResponse;

/// A registered tool: its advertised definition plus its handler.
pub struct ToolEntry {
    /// Definition advertised via `tools/list`.
    pub definition: ToolDefinition,
    /// Handler invoked for `tools/call`.
    pub handler: ToolHandler,
}

/// Ordered mapping from tool name to entry.
///
/// Iteration order is registration order, so `tools/list` is stable.
pub struct ToolRegistry {
    entries: IndexMap<String, ToolEntry>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates a registry with all built-in Excel tools registered.
    #[must_use]
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(read_excel_file::definition(), read_excel_file::handler);
        registry.register(get_excel_summary::definition(), get_excel_summary::handler);
        registry.register(search_excel_data::definition(), search_excel_data::handler);
        registry
    }

    /// Registers a tool, replacing any previous entry with the same name.
    pub fn register(&mut self, definition: ToolDefinition, handler: ToolHandler) {
        self.entries
            .insert(definition.name.clone(), ToolEntry {
                definition,
                handler,
            });
    }

    /// Returns all tool definitions in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.entries.values().map(|e| &e.definition).collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dispatches a call to the named tool.
    ///
    /// Returns `None` if no tool with that name is registered.
    #[must_use]
    pub fn call(&self, context: &ToolContext, name: &str, arguments: &Value) -> Option<ToolResponse> {
        let entry = self.entries.get(name)?;
        tracing::info!(tool = name, "dispatching tool call");
        Some((entry.handler)(context, arguments))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_builtin_tools()
    }
}
