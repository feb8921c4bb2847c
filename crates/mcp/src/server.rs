// MCP server: newline-delimited JSON-RPC over stdio

use crate::codec::{Frame, MessageCodec, MAX_MESSAGE_BYTES};
use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerInfo, JSONRPC_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "crawleo-mcp";

/// Serves the registered tools to one client connection.
///
/// Each request runs on its own task, so a slow upstream call does not hold
/// up other requests. Responses are written as they complete.
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
    max_message_bytes: usize,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            max_message_bytes: MAX_MESSAGE_BYTES,
        }
    }

    /// Cap on the size of one incoming message.
    pub fn with_max_message_bytes(mut self, max_message_bytes: usize) -> Self {
        self.max_message_bytes = max_message_bytes;
        self
    }

    /// Serve on stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one connection until `reader` reaches EOF and every in-flight
    /// request has been answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frames = FramedRead::new(
            reader,
            MessageCodec::with_max_length(self.max_message_bytes),
        );
        let mut sink = FramedWrite::new(writer, MessageCodec::new());
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let read_loop = async move {
            while let Some(frame) = frames.next().await {
                let line = match frame.context("Failed to read from transport")? {
                    Frame::Message(line) => line,
                    Frame::Rejected(error) => {
                        warn!(error = %error.message, "Rejected incoming message");
                        let _ = tx.send(JsonRpcResponse::error(Value::Null, error));
                        continue;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let server = self.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_line(&line).await {
                        // Only fails once the writer is gone.
                        let _ = tx.send(response);
                    }
                });
            }
            debug!("Transport closed, draining in-flight requests");
            Ok::<_, anyhow::Error>(())
        };

        let write_loop = async {
            while let Some(response) = rx.recv().await {
                let line = serde_json::to_string(&response)?;
                sink.send(line)
                    .await
                    .context("Failed to write to transport")?;
            }
            Ok::<_, anyhow::Error>(())
        };

        tokio::try_join!(read_loop, write_loop)?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw message. Notifications and client responses yield no
    /// reply.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                ))
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        // `Option<Value>` would read an explicit null id as a notification.
        if value.get("method").is_some() && value.get("id") == Some(&Value::Null) {
            return Some(JsonRpcResponse::error(
                Value::Null,
                JsonRpcError::invalid_request("Invalid Request: id must not be null"),
            ));
        }
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid Request: {}", e)),
                ))
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        // No method means a response to a server request; none are sent.
        let method = request.method?;

        match request.id {
            Some(id) => Some(match self.handle_request(&method, request.params).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(error) => JsonRpcResponse::error(id, error),
            }),
            None => {
                debug!(method = %method, "Notification");
                None
            }
        }
    }

    async fn handle_request(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, JsonRpcError> {
        debug!(method = %method, "Request");

        match method {
            "initialize" => {
                let params: InitializeParams = match params {
                    Some(params) => parse_params(params)?,
                    None => InitializeParams::default(),
                };
                let result = InitializeResult::negotiate(&params, self.info.clone());
                info!(
                    protocol_version = %result.protocol_version,
                    client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
                    "Client initialized"
                );
                to_result(&result)
            }
            "ping" => Ok(json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.registry.list_schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = parse_params(params.unwrap_or(Value::Null))?;
                let result = self.registry.call(&params.name, params.arguments).await?;
                to_result(&result)
            }
            _ => Err(JsonRpcError::method_not_found(method)),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
