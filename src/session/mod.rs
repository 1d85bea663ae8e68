//! MCP session over a byte stream
//!
//! This module handles:
//! - Reading newline-delimited JSON-RPC frames from stdin
//! - Dispatching `initialize`, `ping`, `tools/list` and `tools/call`
//! - Writing exactly one response per request, none per notification

mod connection;
mod handler;

pub use handler::McpSession;
