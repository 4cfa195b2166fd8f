//! Author tools.

use serde_json::json;

use super::{McpTool, ToolContext, render};
use crate::config::{api, fields};
use crate::error::ToolResult;
use crate::models::AuthorPapersInput;

/// Author papers tool.
pub struct AuthorPapersTool;

#[async_trait::async_trait]
impl McpTool for AuthorPapersTool {
    fn name(&self) -> &'static str {
        "get_author_papers"
    }

    fn description(&self) -> &'static str {
        "Get papers written by a specific author, identified by Semantic Scholar author ID."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "authorId": {
                    "type": "string",
                    "description": "Semantic Scholar author ID"
                },
                "limit": {
                    "type": "integer",
                    "default": api::DEFAULT_LIMIT,
                    "minimum": 0,
                    "maximum": api::MAX_LIST_LIMIT,
                    "description": "Maximum number of papers to return"
                },
                "fields": {
                    "type": "string",
                    "default": fields::AUTHOR_PAPERS,
                    "description": "Comma-separated list of fields to return for each paper"
                }
            },
            "required": ["authorId"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AuthorPapersInput = serde_json::from_value(input)?;
        params.validate()?;

        let body = ctx
            .client
            .get_author_papers(&params.author_id, params.effective_limit(), params.fields())
            .await?;

        render(&body)
    }
}
