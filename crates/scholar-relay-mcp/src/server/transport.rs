//! HTTP transport.
//!
//! Streamable HTTP without server-initiated streams: every JSON-RPC message
//! is a `POST /mcp` and the response comes back in the HTTP body.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::protocol::{JsonRpcRequest, handle_request, parse_error};
use crate::tools::{McpTool, ToolContext};

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub tools: Vec<Box<dyn McpTool>>,
    pub ctx: ToolContext,
}

/// Create the HTTP router for MCP.
pub fn create_router(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> Router {
    let state = Arc::new(HttpState { tools, ctx });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/mcp", post(handle_mcp_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "scholar-relay-mcp",
        "version": env!("CARGO_PKG_VERSION"),
        "tools": state.tools.len(),
        "rateLimitIntervalMs": state.ctx.client.gate().interval().as_millis() as u64
    }))
}

/// Handle POST requests to /mcp.
///
/// The body is parsed here rather than by the `Json` extractor so malformed
/// input still gets a JSON-RPC parse error.
async fn handle_mcp_post(State(state): State<Arc<HttpState>>, body: Bytes) -> Response {
    let req = match serde_json::from_slice::<JsonRpcRequest>(&body) {
        Ok(req) => req,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(parse_error(&e))).into_response(),
    };

    tracing::debug!(method = %req.method, "Handling MCP POST request");

    match handle_request(&req, &state.tools, &state.ctx).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
