//! Apple Maps MCP shared types
//!
//! This crate provides the protocol types, line codec and the pure
//! request-to-command translation used by the `maps-mcp` server.

pub mod catalog;
pub mod codec;
pub mod escape;
pub mod operation;
pub mod protocol;
pub mod translate;

pub use operation::{Operation, OperationError, TravelMode};
pub use protocol::*;
pub use translate::{translate, Translation};

/// Resource limits for the server
pub mod limits {
    /// Maximum size of one inbound JSON-RPC line (10 MB)
    pub const MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

    /// Cap on captured stdout/stderr of one external command (50 MiB)
    pub const MAX_OUTPUT_BYTES: usize = 50 * 1024 * 1024;

    /// MCP protocol revision advertised by `initialize`
    pub const PROTOCOL_VERSION: &str = "2024-11-05";
}

/// Builder helpers for responses
impl ToolCallResult {
    /// Successful result carrying a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: None,
        }
    }

    /// Error result carrying a single text block
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: Some(true),
        }
    }

    /// True when the result is flagged as an error
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Concatenated text of all content blocks
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".into(),
            text: text.into(),
        }
    }
}
