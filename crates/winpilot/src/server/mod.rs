//! Stdio tool server: newline-delimited JSON-RPC 2.0 on stdin/stdout.
//!
//! Requests are handled one at a time, in arrival order. Each request gets a
//! child of the shutdown token, so a signal abandons the in-flight call and
//! then stops the loop.

mod errors;
mod jsonl;
mod protocol;
mod results;
mod shutdown;
#[cfg(test)]
pub(crate) mod test_support;
mod tools;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use winpilot_core::{Collaborator, WindowManager};

pub use errors::ServerError;
use jsonl::{Line, read_line, write_jsonl};
use protocol::{
    CallToolParams, DEFAULT_PROTOCOL_VERSION, InitializeParams, JSONRPC_VERSION, Request, Response,
    RpcError,
};
pub use results::{AppWindowList, ScreenList, WindowList};
pub use shutdown::signal_token;

const SERVER_NAME: &str = "winpilot";

pub struct Server<C> {
    manager: WindowManager<C>,
}

impl<C: Collaborator> Server<C> {
    pub fn new(manager: WindowManager<C>) -> Self {
        Self { manager }
    }

    /// Serve requests from `reader` until EOF or until `shutdown` fires.
    pub async fn run<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        shutdown: &CancellationToken,
    ) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(event = "server.loop_started");

        loop {
            let line = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!(event = "server.shutdown_requested");
                    break;
                }
                line = read_line(&mut reader) => line?,
            };

            let response = match line {
                None => {
                    info!(event = "server.input_closed");
                    break;
                }
                Some(Line::Text(line)) if line.is_empty() => continue,
                Some(Line::Text(line)) => self.handle_line(&line, shutdown).await,
                Some(Line::NotUtf8(e)) => {
                    warn!(event = "server.request_unparseable", error = %e);
                    Some(Response::failure(Value::Null, RpcError::parse_error(e)))
                }
            };

            if let Some(response) = response {
                write_jsonl(&mut writer, &response).await?;
            }
        }

        info!(event = "server.loop_completed");
        Ok(())
    }

    /// Handle one raw line. Notifications produce no response.
    pub async fn handle_line(&self, line: &str, shutdown: &CancellationToken) -> Option<Response> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(event = "server.request_unparseable", error = %e);
                return Some(Response::failure(Value::Null, RpcError::parse_error(e)));
            }
        };

        let id = value.get("id").cloned();
        let request: Request = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!(event = "server.request_invalid", error = %e);
                return Some(Response::failure(
                    id.unwrap_or(Value::Null),
                    RpcError::invalid_request(e),
                ));
            }
        };

        if request.jsonrpc.as_deref().is_some_and(|v| v != JSONRPC_VERSION) {
            warn!(event = "server.request_invalid", jsonrpc = ?request.jsonrpc);
            return Some(Response::failure(
                id.unwrap_or(Value::Null),
                RpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        let Some(id) = request.id.clone() else {
            debug!(event = "server.notification_received", method = %request.method);
            return None;
        };

        info!(event = "server.request_received", method = %request.method, id = %id);

        let cancel = shutdown.child_token();
        let response = match self.handle_request(&request, &cancel).await {
            Ok(result) => Response::success(id, result),
            Err(e) => {
                warn!(
                    event = "server.request_failed",
                    method = %request.method,
                    code = e.code,
                    error = %e.message
                );
                Response::failure(id, e)
            }
        };
        Some(response)
    }

    async fn handle_request(
        &self,
        request: &Request,
        cancel: &CancellationToken,
    ) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = parse_params(request.params.clone())?;
                Ok(initialize_result(params))
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::tool_definitions() })),
            "tools/call" => {
                let params: CallToolParams = parse_params(request.params.clone())?;
                let arguments = params.arguments.unwrap_or_else(|| json!({}));
                let result = tools::call_tool(&self.manager, &params.name, arguments, cancel).await?;
                serde_json::to_value(result).map_err(RpcError::internal)
            }
            other => Err(RpcError::method_not_found(other)),
        }
    }
}

/// Absent params deserialize from an empty object.
fn parse_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<T, RpcError> {
    serde_json::from_value(params.unwrap_or_else(|| json!({}))).map_err(RpcError::invalid_params)
}

fn initialize_result(params: InitializeParams) -> Value {
    let protocol_version = params
        .protocol_version
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string());
    json!({
        "protocolVersion": protocol_version,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": { "tools": {} },
    })
}

/// Serve on the process's stdin and stdout.
pub async fn serve_stdio<C: Collaborator>(
    manager: WindowManager<C>,
    shutdown: &CancellationToken,
) -> Result<(), ServerError> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    Server::new(manager).run(reader, writer, shutdown).await
}
