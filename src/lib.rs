//! excel-mcp-server: MCP server exposing read-only Excel workbook tools.
//!
//! This library lets AI assistants inspect spreadsheet files through three
//! tools served over the Model Context Protocol:
//!
//! - `read_excel_file` — structured read of one sheet with a row limit
//! - `get_excel_summary` — per-sheet statistics plus a small data preview
//! - `search_excel_data` — filter rows by a column value
//!
//! Every tool call returns a `success`/`error`/`data` envelope; failures
//! inside a tool never escalate to protocol errors.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Configuration error types
//! - [`mcp`] — MCP protocol implementation (stdio transport, JSON-RPC)
//! - [`tools`] — Tool handlers and the explicit tool registry
//! - [`workbook`] — Spreadsheet access built on calamine

pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;
pub mod workbook;
