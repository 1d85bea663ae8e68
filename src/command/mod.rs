//! Tool call execution for the server
//!
//! This module handles:
//! - Parsing tool calls into typed operations
//! - Translating operations into shell commands
//! - Running commands and wrapping the outcome for the client

mod executor;

pub use executor::CommandExecutor;
