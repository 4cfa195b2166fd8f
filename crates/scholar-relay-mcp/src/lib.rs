//! Scholar Relay MCP Server
//!
//! A Model Context Protocol (MCP) server that forwards paper and author
//! lookups to the Semantic Scholar Graph API.
//!
//! # Features
//!
//! - **5 MCP Tools**: paper search, paper details, citations, references, author papers
//! - **Rate-gated**: one shared [`RateGate`] spaces every outbound request (1 req/s by default)
//! - **Two transports**: line-delimited stdio and HTTP
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use scholar_relay_mcp::{Config, RateGate, SemanticScholarClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gate = Arc::new(RateGate::new(Duration::from_secs(1)));
//!     let client = SemanticScholarClient::with_gate(Config::from_env()?, Arc::clone(&gate))?;
//!
//!     let papers = client.search_papers("attention is all you need", 5, "title,year").await?;
//!     println!("{papers}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_gate;
pub mod server;
pub mod tools;

pub use client::SemanticScholarClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
pub use rate_gate::RateGate;
