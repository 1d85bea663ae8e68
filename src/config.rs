//! Server configuration

use maps_shared::limits;

/// Runtime settings for the MCP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Name reported in `serverInfo`
    pub server_name: String,
    /// Version reported in `serverInfo`
    pub server_version: String,
    /// Shell used to run translated commands (`<shell> -c <command>`)
    pub shell: String,
    /// Cap on captured stdout/stderr per command
    pub max_output_bytes: usize,
    /// Largest accepted inbound JSON-RPC line
    pub max_frame_bytes: usize,
    /// Size of each stdin read
    pub read_chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: "apple-maps".into(),
            server_version: env!("CARGO_PKG_VERSION").into(),
            shell: "sh".into(),
            max_output_bytes: limits::MAX_OUTPUT_BYTES,
            max_frame_bytes: limits::MAX_MESSAGE_SIZE,
            read_chunk_size: 4096,
        }
    }
}
