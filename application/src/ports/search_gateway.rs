//! Search gateway port
//!
//! Defines the interface for the external web search API.

use async_trait::async_trait;
use scribe_domain::SearchHit;
use thiserror::Error;

/// Errors from a search call
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Search API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed search response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for web search.
///
/// One call issues one query. Results come back in the provider's relevance
/// order; an empty list is a valid answer.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}
