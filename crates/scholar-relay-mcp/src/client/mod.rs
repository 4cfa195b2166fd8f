//! Semantic Scholar API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Optional `x-api-key` authentication
//! - Request spacing through a shared [`RateGate`]
//!
//! Every public operation performs exactly one GET. The gate is acquired
//! right before the request is sent and is not held while it is in flight.

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::rate_gate::RateGate;

/// Header carrying the Semantic Scholar API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct SemanticScholarClient {
    /// HTTP client.
    client: Client,

    /// Shared request spacing.
    gate: Arc<RateGate>,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,
}

impl SemanticScholarClient {
    /// Create a new client with its own rate gate.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let gate = Arc::new(RateGate::new(config.rate_limit_interval));
        Self::with_gate(config, gate)
    }

    /// Create a client that spaces its requests through an existing gate.
    ///
    /// `config.rate_limit_interval` is ignored; the gate's interval applies.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or HTTP
    /// client initialization fails.
    pub fn with_gate(config: Config, gate: Arc<RateGate>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(ref key) = config.api_key {
            let mut value = HeaderValue::from_str(key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client, gate, api_key: config.api_key, graph_api_url: config.graph_api_url })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The gate this client acquires before every request.
    #[must_use]
    pub fn gate(&self) -> &Arc<RateGate> {
        &self.gate
    }

    /// Search for papers.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_papers(
        &self,
        query: &str,
        limit: u32,
        fields: &str,
    ) -> ClientResult<serde_json::Value> {
        let params = [
            ("query", query.to_string()),
            ("limit", limit.to_string()),
            ("fields", fields.to_string()),
        ];

        self.get(&["paper", "search"], &params).await
    }

    /// Get a single paper by ID.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_paper(&self, paper_id: &str, fields: &str) -> ClientResult<serde_json::Value> {
        let params = [("fields", fields.to_string())];

        self.get(&["paper", paper_id], &params).await
    }

    /// Get papers citing a paper.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_citations(
        &self,
        paper_id: &str,
        limit: u32,
        fields: &str,
    ) -> ClientResult<serde_json::Value> {
        let params = [("limit", limit.to_string()), ("fields", fields.to_string())];

        self.get(&["paper", paper_id, "citations"], &params).await
    }

    /// Get papers referenced by a paper.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_references(
        &self,
        paper_id: &str,
        limit: u32,
        fields: &str,
    ) -> ClientResult<serde_json::Value> {
        let params = [("limit", limit.to_string()), ("fields", fields.to_string())];

        self.get(&["paper", paper_id, "references"], &params).await
    }

    /// Get papers written by an author.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author_papers(
        &self,
        author_id: &str,
        limit: u32,
        fields: &str,
    ) -> ClientResult<serde_json::Value> {
        let params = [("limit", limit.to_string()), ("fields", fields.to_string())];

        self.get(&["author", author_id, "papers"], &params).await
    }

    /// Make a GET request.
    async fn get(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> ClientResult<serde_json::Value> {
        let url = self.endpoint(segments, params)?;

        self.gate.acquire().await;

        tracing::debug!(path = %url.path(), "Sending request to Semantic Scholar");
        let response = self.client.get(url).send().await?;

        let response = Self::handle_response(response).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(ClientError::from)
    }

    /// Build an endpoint URL. Each segment is percent-encoded on its own, so
    /// an ID containing `/` or `?` stays a single path segment.
    fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.graph_api_url)?;

        url.path_segments_mut()
            .map_err(|()| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = status.as_u16(), "Semantic Scholar returned an error status");

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let body = response.text().await.unwrap_or_default();

        Err(ClientError::from_status(status.as_u16(), body, retry_after))
    }
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient")
            .field("has_api_key", &self.has_api_key())
            .field("rate_limit_interval", &self.gate.interval())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> SemanticScholarClient {
        SemanticScholarClient::new(Config::for_testing(base)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments_under_base_path() {
        let client = client_for("http://localhost:8080");
        let url = client.endpoint(&["paper", "abc123", "citations"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/graph/v1/paper/abc123/citations");
    }

    #[test]
    fn test_endpoint_encodes_ids_as_one_segment() {
        let client = client_for("http://localhost:8080");
        let url = client.endpoint(&["paper", "DOI:10.1/x?y"], &[]).unwrap();
        assert_eq!(url.path(), "/graph/v1/paper/DOI:10.1%2Fx%3Fy");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_endpoint_encodes_query_params() {
        let client = client_for("http://localhost:8080");
        let params = [("query", "graph neural nets".to_string()), ("limit", "5".to_string())];
        let url = client.endpoint(&["paper", "search"], &params).unwrap();
        assert_eq!(url.query(), Some("query=graph+neural+nets&limit=5"));
    }

    #[test]
    fn test_clones_share_one_gate() {
        let client = client_for("http://localhost:8080");
        let cloned = client.clone();
        assert!(Arc::ptr_eq(client.gate(), cloned.gate()));
    }

    #[test]
    fn test_invalid_api_key_header_is_rejected() {
        let config = Config::new(Some("bad\nkey".to_string()));
        assert!(SemanticScholarClient::new(config).is_err());
    }
}
