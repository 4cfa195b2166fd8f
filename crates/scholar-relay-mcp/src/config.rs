//! Configuration for the Scholar Relay MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Minimum spacing between outbound requests (1 req/s).
    pub const RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(1);

    /// Default number of results per tool call.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Largest page the search endpoint accepts.
    pub const MAX_SEARCH_LIMIT: u32 = 100;

    /// Largest page the citation, reference and author-paper endpoints accept.
    pub const MAX_LIST_LIMIT: u32 = 1000;
}

/// Default `fields` parameter per tool.
pub mod fields {
    /// Paper search.
    pub const SEARCH: &str = "title,authors,year,abstract,citationCount,url";

    /// Single paper lookup.
    pub const DETAILS: &str = "title,authors,year,abstract,citationCount,url,venue,\
                               publicationDate,referenceCount,influentialCitationCount";

    /// Citing and cited papers.
    pub const CITATION_LIST: &str = "title,authors,year,citationCount";

    /// Papers by an author.
    pub const AUTHOR_PAPERS: &str = "title,year,citationCount,url";
}

/// Environment variable holding the Semantic Scholar API key.
pub const API_KEY_ENV: &str = "SEMANTIC_SCHOLAR_API_KEY";

/// Environment variable overriding the request spacing, in seconds.
pub const RATE_LIMIT_ENV: &str = "SEMANTIC_SCHOLAR_RATE_LIMIT_SECS";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Base URL for Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum spacing between outbound requests.
    pub rate_limit_interval: Duration,
}

impl Config {
    /// Create a new configuration with optional API key.
    ///
    /// An empty key is treated as no key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            graph_api_url: api::GRAPH_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_interval: api::RATE_LIMIT_INTERVAL,
        }
    }

    /// Create a test configuration with custom URLs for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_interval: Duration::ZERO, // No spacing in tests
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if the rate limit override is not a valid number of seconds.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok();
        let config = Self::new(api_key);

        match std::env::var(RATE_LIMIT_ENV) {
            Ok(raw) => {
                let secs: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow::anyhow!("{RATE_LIMIT_ENV}={raw:?} is not a number: {e}"))?;
                config.with_rate_limit_secs(secs)
            }
            Err(_) => Ok(config),
        }
    }

    /// Override the request spacing.
    ///
    /// # Errors
    ///
    /// Returns error if `secs` is negative, NaN or infinite. Zero disables spacing.
    pub fn with_rate_limit_secs(mut self, secs: f64) -> anyhow::Result<Self> {
        if !secs.is_finite() || secs < 0.0 {
            anyhow::bail!(
                "rate limit interval must be a finite, non-negative number of seconds, got {secs}"
            );
        }
        self.rate_limit_interval = Duration::try_from_secs_f64(secs)?;
        Ok(self)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
