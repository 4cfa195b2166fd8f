//! Stdio transport for MCP protocol.
//!
//! Handles line-delimited JSON-RPC 2.0 over stdin/stdout. Each request runs
//! on its own task, so a slow `tools/call` does not hold up the lines after
//! it; responses funnel through one channel to a single writer and may come
//! back out of request order.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use super::protocol::{JsonRpcRequest, JsonRpcResponse, handle_request, parse_error};
use crate::tools::{McpTool, ToolContext};

/// Handle MCP protocol over the process's stdin and stdout.
pub async fn run_stdio(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> anyhow::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    serve_lines(reader, writer, Arc::from(tools), ctx).await
}

/// Serve requests from `reader` until EOF, one JSON message per line.
///
/// Returns once input is exhausted and every in-flight request has been
/// answered.
pub async fn serve_lines<R, W>(
    reader: R,
    mut writer: W,
    tools: Arc<[Box<dyn McpTool>]>,
    ctx: ToolContext,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

    let read = async move {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => {
                    let tools = Arc::clone(&tools);
                    let ctx = ctx.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Some(response) = handle_request(&request, &tools, &ctx).await {
                            // Only fails once the writer has stopped on an I/O error.
                            let _ = tx.send(response);
                        }
                    });
                }
                Err(e) => {
                    let _ = tx.send(parse_error(&e));
                }
            }
        }

        tracing::info!("Stdin closed, shutting down");
        drop(tx);
        anyhow::Ok(())
    };

    // Ends when the reader and every spawned request have dropped their sender.
    let write = async move {
        while let Some(response) = rx.recv().await {
            write_message(&mut writer, &response).await?;
        }
        anyhow::Ok(())
    };

    tokio::try_join!(read, write)?;
    Ok(())
}

async fn write_message<W>(writer: &mut W, response: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)?;
    writer.write_all(response_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
