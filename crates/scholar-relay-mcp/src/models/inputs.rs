//! Input models for MCP tool parameters.

use serde::{Deserialize, Serialize};

use crate::config::{api, fields};
use crate::error::{ToolError, ToolResult};

fn default_limit() -> u64 {
    u64::from(api::DEFAULT_LIMIT)
}

/// Cap a requested page size at `max`. Any non-negative JSON integer is
/// accepted, however large.
fn clamp_limit(limit: u64, max: u32) -> u32 {
    u32::try_from(limit).map_or(max, |limit| limit.min(max))
}

/// Reject empty or whitespace-only identifiers and queries.
fn require_non_empty(field: &str, value: &str) -> ToolResult<()> {
    if value.trim().is_empty() {
        return Err(ToolError::validation(field, "cannot be empty"));
    }
    Ok(())
}

/// Pick the caller's field list, falling back to the tool default when
/// nothing (or only whitespace) was given.
fn fields_or<'a>(requested: Option<&'a str>, default: &'a str) -> &'a str {
    requested.map(str::trim).filter(|f| !f.is_empty()).unwrap_or(default)
}

/// Input for paper search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPapersInput {
    /// Search query string.
    pub query: String,

    /// Maximum number of results (capped at 100).
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Comma-separated list of fields to return.
    #[serde(default)]
    pub fields: Option<String>,
}

impl SearchPapersInput {
    /// Check required parameters.
    pub fn validate(&self) -> ToolResult<()> {
        require_non_empty("query", &self.query)
    }

    /// Limit sent to the API.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.limit, api::MAX_SEARCH_LIMIT)
    }

    /// Fields sent to the API.
    #[must_use]
    pub fn fields(&self) -> &str {
        fields_or(self.fields.as_deref(), fields::SEARCH)
    }
}

/// Input for a single paper lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDetailsInput {
    /// Semantic Scholar paper ID, or a prefixed external ID (DOI:, ARXIV:, ...).
    #[serde(alias = "paper_id")]
    pub paper_id: String,

    /// Comma-separated list of fields to return.
    #[serde(default)]
    pub fields: Option<String>,
}

impl PaperDetailsInput {
    /// Check required parameters.
    pub fn validate(&self) -> ToolResult<()> {
        require_non_empty("paperId", &self.paper_id)
    }

    /// Fields sent to the API.
    #[must_use]
    pub fn fields(&self) -> &str {
        fields_or(self.fields.as_deref(), fields::DETAILS)
    }
}

/// Input for citation and reference listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperLinksInput {
    /// Semantic Scholar paper ID.
    #[serde(alias = "paper_id")]
    pub paper_id: String,

    /// Maximum number of linked papers (capped at 1000).
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Comma-separated list of fields to return for each linked paper.
    #[serde(default)]
    pub fields: Option<String>,
}

impl PaperLinksInput {
    /// Check required parameters.
    pub fn validate(&self) -> ToolResult<()> {
        require_non_empty("paperId", &self.paper_id)
    }

    /// Limit sent to the API.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.limit, api::MAX_LIST_LIMIT)
    }

    /// Fields sent to the API.
    #[must_use]
    pub fn fields(&self) -> &str {
        fields_or(self.fields.as_deref(), fields::CITATION_LIST)
    }
}

/// Input for author papers retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPapersInput {
    /// Semantic Scholar author ID.
    #[serde(alias = "author_id")]
    pub author_id: String,

    /// Maximum papers to return (capped at 1000).
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Comma-separated list of fields to return for each paper.
    #[serde(default)]
    pub fields: Option<String>,
}

impl AuthorPapersInput {
    /// Check required parameters.
    pub fn validate(&self) -> ToolResult<()> {
        require_non_empty("authorId", &self.author_id)
    }

    /// Limit sent to the API.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.limit, api::MAX_LIST_LIMIT)
    }

    /// Fields sent to the API.
    #[must_use]
    pub fn fields(&self) -> &str {
        fields_or(self.fields.as_deref(), fields::AUTHOR_PAPERS)
    }
}
