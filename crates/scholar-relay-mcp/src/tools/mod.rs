//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates input parameters
//! 2. Makes one call on the Semantic Scholar API client (which waits on the rate gate)
//! 3. Returns the API body as pretty-printed JSON

mod authors;
mod papers;

pub use authors::*;
pub use papers::*;

use std::sync::Arc;

use crate::client::SemanticScholarClient;
use crate::error::ToolResult;

/// Tool execution context. Cheap to clone; clones share one client and gate.
#[derive(Clone)]
pub struct ToolContext {
    /// API client.
    pub client: Arc<SemanticScholarClient>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<SemanticScholarClient>) -> Self {
        Self { client }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_papers").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Paper tools (4)
        Box::new(papers::SearchPapersTool),
        Box::new(papers::PaperDetailsTool),
        Box::new(papers::PaperCitationsTool),
        Box::new(papers::PaperReferencesTool),

        // Author tools (1)
        Box::new(authors::AuthorPapersTool),
    ]
}

/// Render an API body the way every tool returns it.
pub(crate) fn render(body: &serde_json::Value) -> ToolResult<String> {
    Ok(serde_json::to_string_pretty(body)?)
}
