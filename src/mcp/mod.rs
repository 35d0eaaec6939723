//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the Excel tools to AI-assistant clients over stdio using
//! JSON-RPC 2.0 messages: [`transport`] handles line-delimited message I/O,
//! [`protocol`] defines the message types, and [`server`] drives the
//! lifecycle and dispatches tool calls through the registry in
//! [`crate::tools`].
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::StdioTransport;
