// src/mcp/stdio.rs
//
// Newline-delimited JSON-RPC over a byte stream. Requests run concurrently;
// one writer task keeps response lines whole.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};

/// Serves requests read from `reader` until EOF or an I/O error, writing one
/// response line per request to `writer`.
pub async fn serve<R, W>(state: AppState, mut reader: R, mut writer: W)
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();
    let writer_task = tokio::spawn(async move {
        while let Some(response) = rx.recv().await {
            let response_json = match serde_json::to_string(&response) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize response: {}", e);
                    continue;
                }
            };
            debug!("Sending: {}", response_json);
            let written = writer
                .write_all(format!("{}\n", response_json).as_bytes())
                .await;
            if let Err(e) = written.and(writer.flush().await) {
                error!("Failed to write response: {}", e);
                break;
            }
        }
    });

    let mut buf = Vec::new();
    loop {
        buf.clear();

        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                info!("EOF received, shutting down MCP server");
                break;
            }
            Ok(_) => {
                let line = match std::str::from_utf8(&buf) {
                    Ok(line) => line.trim(),
                    Err(e) => {
                        warn!("Dropping line that is not valid UTF-8: {}", e);
                        let _ = tx.send(Response::error(
                            Value::Null,
                            error_codes::PARSE_ERROR,
                            format!("Parse error: {}", e),
                        ));
                        continue;
                    }
                };
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {}", line);

                match serde_json::from_str::<Request>(line) {
                    Ok(request) => {
                        let state = state.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            if let Some(response) = handle_mcp_request(request, state).await {
                                let _ = tx.send(response);
                            }
                        });
                    }
                    Err(parse_error) => {
                        error!("JSON parse error: {}", parse_error);
                        let _ = tx.send(Response::error(
                            Value::Null,
                            error_codes::PARSE_ERROR,
                            format!("Parse error: {}", parse_error),
                        ));
                    }
                }
            }
            Err(e) => {
                error!("Failed to read request: {}", e);
                break;
            }
        }
    }

    // In-flight requests still hold senders; the writer drains until they finish.
    drop(tx);
    if let Err(e) = writer_task.await {
        warn!("Response writer stopped abnormally: {}", e);
    }
}
