//! Scholar Relay MCP Server - Entry Point
//!
//! Provides both stdio and HTTP transports.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_relay_mcp::config::{API_KEY_ENV, RATE_LIMIT_ENV};
use scholar_relay_mcp::{SemanticScholarClient, config::Config, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "scholar-relay-mcp")]
#[command(about = "Rate-gated MCP server for the Semantic Scholar API")]
#[command(version)]
struct Cli {
    /// Semantic Scholar API key (optional, sent as x-api-key)
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Minimum seconds between outbound API requests
    #[arg(long, default_value_t = 1.0, env = RATE_LIMIT_ENV)]
    rate_limit_secs: f64,

    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output
    #[default]
    Stdio,
    /// HTTP, one JSON-RPC message per POST
    Http,
}

/// Logs go to stderr; stdout carries the stdio transport.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment and flags still apply.
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    if let Ok(path) = dotenv_result {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let config = Config::new(cli.api_key).with_rate_limit_secs(cli.rate_limit_secs)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?cli.transport,
        has_api_key = config.has_api_key(),
        rate_limit_interval = ?config.rate_limit_interval,
        "Starting Scholar Relay MCP server"
    );

    let client = SemanticScholarClient::new(config)?;
    let server = McpServer::new(client);

    match cli.transport {
        Transport::Stdio => {
            tracing::info!("Running in stdio mode");
            server.run_stdio().await?;
        }
        Transport::Http => {
            tracing::info!(port = cli.port, "Running in HTTP mode");
            server.run_http(cli.port).await?;
        }
    }

    Ok(())
}
