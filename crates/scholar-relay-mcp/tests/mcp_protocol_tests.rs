//! Tests for MCP protocol JSON-RPC handling over both transports.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholar_relay_mcp::client::SemanticScholarClient;
use scholar_relay_mcp::config::Config;
use scholar_relay_mcp::server::protocol::{JsonRpcRequest, handle_request};
use scholar_relay_mcp::server::{McpServer, stdio, transport};
use scholar_relay_mcp::tools::{ToolContext, register_all_tools};

fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    let config = Config::for_testing(&mock_server.uri());
    let client = SemanticScholarClient::new(config).unwrap();
    ToolContext::new(Arc::new(client))
}

fn request(value: serde_json::Value) -> JsonRpcRequest {
    serde_json::from_value(value).unwrap()
}

async fn dispatch(mock_server: &MockServer, value: serde_json::Value) -> Option<serde_json::Value> {
    let ctx = setup_test_context(mock_server);
    let tools = register_all_tools();
    handle_request(&request(value), &tools, &ctx)
        .await
        .map(|response| serde_json::to_value(response).unwrap())
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn test_initialize_reports_server_info() {
    let mock_server = MockServer::start().await;
    let response = dispatch(
        &mock_server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
    )
    .await
    .unwrap();

    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "scholar-relay-mcp");
}

#[tokio::test]
async fn test_tools_list_names_all_five_tools() {
    let mock_server = MockServer::start().await;
    let response =
        dispatch(&mock_server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await.unwrap();

    let mut names: Vec<_> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "get_author_papers",
            "get_paper_citations",
            "get_paper_details",
            "get_paper_references",
            "search_papers",
        ]
    );
    assert!(response["result"]["tools"][0]["inputSchema"].is_object());
}

#[tokio::test]
async fn test_tools_call_wraps_result_as_text_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paperId": "p1", "title": "Hello"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = dispatch(
        &mock_server,
        json!({
            "jsonrpc": "2.0",
            "id": "call-1",
            "method": "tools/call",
            "params": {"name": "get_paper_details", "arguments": {"paperId": "p1"}}
        }),
    )
    .await
    .unwrap();

    assert_eq!(response["id"], "call-1");
    assert_eq!(response["result"]["content"][0]["type"], "text");
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let body: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["title"], "Hello");
}

#[tokio::test]
async fn test_tools_call_failure_is_jsonrpc_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&mock_server)
        .await;

    let response = dispatch(
        &mock_server,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "get_paper_details", "arguments": {"paperId": "nope"}}
        }),
    )
    .await
    .unwrap();

    assert_eq!(response["error"]["code"], -32000);
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn test_tools_call_unknown_tool_and_missing_name() {
    let mock_server = MockServer::start().await;

    let unknown = dispatch(
        &mock_server,
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "exhaustive_search"}}),
    )
    .await
    .unwrap();
    assert_eq!(unknown["error"]["code"], -32602);

    let missing = dispatch(
        &mock_server,
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {}}),
    )
    .await
    .unwrap();
    assert_eq!(missing["error"]["code"], -32602);
}

#[tokio::test]
async fn test_unknown_method_and_notifications() {
    let mock_server = MockServer::start().await;

    let unknown =
        dispatch(&mock_server, json!({"jsonrpc": "2.0", "id": 6, "method": "resources/list"})).await.unwrap();
    assert_eq!(unknown["error"]["code"], -32601);

    let notification =
        dispatch(&mock_server, json!({"jsonrpc": "2.0", "method": "notifications/initialized"})).await;
    assert!(notification.is_none());
}

// =============================================================================
// Stdio Transport
// =============================================================================

/// Run `input` through the stdio loop and parse every line written back.
async fn serve_stdio(ctx: ToolContext, input: &str) -> Vec<serde_json::Value> {
    let mut output = Vec::new();
    stdio::serve_lines(input.as_bytes(), &mut output, Arc::from(register_all_tools()), ctx)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn response_with_id<'a>(lines: &'a [serde_json::Value], id: &serde_json::Value) -> &'a serde_json::Value {
    lines.iter().find(|line| &line["id"] == id).unwrap_or_else(|| panic!("no response for id {id}"))
}

#[tokio::test]
async fn test_stdio_answers_each_line_and_skips_notifications() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);

    let input = concat!(
        "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n",
        "\n",
        "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
        "this is not json\n",
        "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n",
    );
    let lines = serve_stdio(ctx, input).await;

    assert_eq!(lines.len(), 3);
    assert!(response_with_id(&lines, &json!(1))["result"].is_object());
    assert_eq!(response_with_id(&lines, &json!(2))["result"]["tools"].as_array().unwrap().len(), 5);

    let parse_errors: Vec<_> = lines.iter().filter(|line| line.get("id").is_none()).collect();
    assert_eq!(parse_errors.len(), 1);
    assert_eq!(parse_errors[0]["error"]["code"], -32700);
}

#[tokio::test]
async fn test_stdio_runs_tool_calls_concurrently() {
    let latency = Duration::from_millis(400);
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/graph/v1/paper/p[12]$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "slow"})).set_delay(latency))
        .expect(2)
        .mount(&mock_server)
        .await;

    // Interval is zero, so only request overlap can keep this under 2x latency.
    let ctx = setup_test_context(&mock_server);
    let input = concat!(
        "{\"jsonrpc\":\"2.0\",\"id\":\"a\",\"method\":\"tools/call\",",
        "\"params\":{\"name\":\"get_paper_details\",\"arguments\":{\"paperId\":\"p1\"}}}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":\"b\",\"method\":\"tools/call\",",
        "\"params\":{\"name\":\"get_paper_details\",\"arguments\":{\"paperId\":\"p2\"}}}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":\"ping\",\"method\":\"ping\"}\n",
    );

    let start = Instant::now();
    let lines = serve_stdio(ctx, input).await;
    let elapsed = start.elapsed();

    assert!(elapsed < 2 * latency, "two calls took {elapsed:?}");
    assert_eq!(lines.len(), 3);
    // The ping does not queue behind the slow calls.
    assert_eq!(lines[0]["id"], "ping");
    for id in ["a", "b"] {
        let text = response_with_id(&lines, &json!(id))["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("slow"));
    }
}

// =============================================================================
// HTTP Transport
// =============================================================================

#[tokio::test]
async fn test_http_transport_round_trip() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);
    let router = transport::create_router(register_all_tools(), ctx);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });

    let http = reqwest::Client::new();
    let base = format!("http://{addr}");

    let health: serde_json::Value =
        http.get(format!("{base}/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["tools"], 5);

    let response: serde_json::Value = http
        .post(format!("{base}/mcp"))
        .json(&json!({"jsonrpc": "2.0", "id": 9, "method": "ping"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(response["id"], 9);
    assert!(response["result"].is_object());

    let accepted = http
        .post(format!("{base}/mcp"))
        .json(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), reqwest::StatusCode::ACCEPTED);

    let malformed =
        http.post(format!("{base}/mcp")).body("this is not json").send().await.unwrap();
    assert_eq!(malformed.status(), reqwest::StatusCode::BAD_REQUEST);
    let error: serde_json::Value = malformed.json().await.unwrap();
    assert_eq!(error["jsonrpc"], "2.0");
    assert_eq!(error["error"]["code"], -32700);
    assert!(error.get("id").is_none());
}

#[test]
fn test_server_debug_reports_tool_count() {
    let client = SemanticScholarClient::new(Config::default()).unwrap();
    let server = McpServer::new(client);

    assert_eq!(format!("{server:?}"), "McpServer { tools: 5 }");
}
