//! Paper tools: search, details, citations, references.

use serde_json::json;

use super::{McpTool, ToolContext, render};
use crate::config::{api, fields};
use crate::error::ToolResult;
use crate::models::{PaperDetailsInput, PaperLinksInput, SearchPapersInput};

/// Shared schema for the citation and reference listings.
fn paper_links_schema(what: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "paperId": {
                "type": "string",
                "description": "Semantic Scholar paper ID"
            },
            "limit": {
                "type": "integer",
                "default": api::DEFAULT_LIMIT,
                "minimum": 0,
                "maximum": api::MAX_LIST_LIMIT,
                "description": format!("Maximum number of {what} to return")
            },
            "fields": {
                "type": "string",
                "default": fields::CITATION_LIST,
                "description": format!("Comma-separated list of fields to return for each {what}")
            }
        },
        "required": ["paperId"]
    })
}

/// Paper search tool.
pub struct SearchPapersTool;

#[async_trait::async_trait]
impl McpTool for SearchPapersTool {
    fn name(&self) -> &'static str {
        "search_papers"
    }

    fn description(&self) -> &'static str {
        "Search for academic papers on Semantic Scholar by keyword. \
         Returns paper metadata such as title, authors, year and citation count."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query string"
                },
                "limit": {
                    "type": "integer",
                    "default": api::DEFAULT_LIMIT,
                    "minimum": 0,
                    "maximum": api::MAX_SEARCH_LIMIT,
                    "description": "Maximum number of results to return"
                },
                "fields": {
                    "type": "string",
                    "default": fields::SEARCH,
                    "description": "Comma-separated list of fields to return"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchPapersInput = serde_json::from_value(input)?;
        params.validate()?;

        let body = ctx
            .client
            .search_papers(&params.query, params.effective_limit(), params.fields())
            .await?;

        render(&body)
    }
}

/// Single paper lookup tool.
pub struct PaperDetailsTool;

#[async_trait::async_trait]
impl McpTool for PaperDetailsTool {
    fn name(&self) -> &'static str {
        "get_paper_details"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific paper by its Semantic Scholar ID \
         (or a prefixed external ID such as DOI:10.1038/nature14539)."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "paperId": {
                    "type": "string",
                    "description": "Semantic Scholar paper ID (e.g., \"649def34f8be52c8b66281af98ae884c09aef38b\")"
                },
                "fields": {
                    "type": "string",
                    "default": fields::DETAILS,
                    "description": "Comma-separated list of fields to return"
                }
            },
            "required": ["paperId"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: PaperDetailsInput = serde_json::from_value(input)?;
        params.validate()?;

        let body = ctx.client.get_paper(&params.paper_id, params.fields()).await?;

        render(&body)
    }
}

/// Citing papers tool.
pub struct PaperCitationsTool;

#[async_trait::async_trait]
impl McpTool for PaperCitationsTool {
    fn name(&self) -> &'static str {
        "get_paper_citations"
    }

    fn description(&self) -> &'static str {
        "Get papers that cite a specific paper."
    }

    fn input_schema(&self) -> serde_json::Value {
        paper_links_schema("citation")
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: PaperLinksInput = serde_json::from_value(input)?;
        params.validate()?;

        let body = ctx
            .client
            .get_citations(&params.paper_id, params.effective_limit(), params.fields())
            .await?;

        render(&body)
    }
}

/// Referenced papers tool.
pub struct PaperReferencesTool;

#[async_trait::async_trait]
impl McpTool for PaperReferencesTool {
    fn name(&self) -> &'static str {
        "get_paper_references"
    }

    fn description(&self) -> &'static str {
        "Get papers referenced by a specific paper."
    }

    fn input_schema(&self) -> serde_json::Value {
        paper_links_schema("reference")
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: PaperLinksInput = serde_json::from_value(input)?;
        params.validate()?;

        let body = ctx
            .client
            .get_references(&params.paper_id, params.effective_limit(), params.fields())
            .await?;

        render(&body)
    }
}
