//! JSON-RPC dispatch for one MCP session

use anyhow::Result;
use maps_shared::catalog::get_tools;
use maps_shared::limits::PROTOCOL_VERSION;
use maps_shared::*;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use super::connection::{Incoming, StdioConnection};
use crate::command::CommandExecutor;
use crate::config::ServerConfig;

/// Serves MCP requests from one client until its input closes
pub struct McpSession {
    config: ServerConfig,
    executor: CommandExecutor,
}

impl McpSession {
    pub fn new(config: ServerConfig, executor: CommandExecutor) -> Self {
        Self { config, executor }
    }

    /// Run the session loop until EOF
    pub async fn run<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut conn = StdioConnection::new(
            reader,
            writer,
            self.config.max_frame_bytes,
            self.config.read_chunk_size,
        );

        info!(server = %self.config.server_name, "MCP session started");

        while let Some(incoming) = conn.recv().await? {
            let response = match incoming {
                Incoming::Line(line) => {
                    debug!(frame = %preview(&line), "<-");
                    self.handle_line(&line).await
                }
                Incoming::Oversized(len) => Some(JsonRpcResponse::error(
                    None,
                    INVALID_REQUEST,
                    format!("Message too large: {} bytes", len),
                )),
            };

            if let Some(response) = response {
                if let Err(e) = conn.send(&response).await {
                    error!("Failed to write response: {}", e);
                    return Err(e);
                }
            }
        }

        info!("MCP session closed");
        Ok(())
    }

    /// Handle one raw JSON-RPC line, returning the reply if one is owed
    pub async fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_slice(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("Unparseable frame: {}", e);
                return Some(JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e)));
            }
        };

        // Replies from the client to server-initiated requests; we never send any
        if value.get("method").is_none() && (value.get("result").is_some() || value.get("error").is_some()) {
            debug!("Ignoring client response frame");
            return None;
        }

        let id = value.get("id").cloned();
        let req: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ))
            }
        };

        if req.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", req.jsonrpc),
            ));
        }

        if req.is_notification() {
            debug!(method = %req.method, "Notification received");
            return None;
        }

        Some(self.handle_request(req).await)
    }

    async fn handle_request(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        let id = req.id.clone();

        match req.method.as_str() {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.into(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: self.config.server_name.clone(),
                        version: self.config.server_version.clone(),
                    },
                };
                info!(client = ?req.params.get("clientInfo"), "Client initialized");
                respond(id, &result)
            }

            "ping" => JsonRpcResponse::success(id, json!({})),

            "tools/list" => respond(id, &ToolsListResult { tools: get_tools() }),

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
                };

                let result = self.executor.execute(params).await;
                respond(id, &result)
            }

            other => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
        }
    }
}

fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    }
}

/// Truncated frame text for logs
fn preview(line: &[u8]) -> String {
    const MAX: usize = 120;
    let text = String::from_utf8_lossy(line);
    match text.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}
