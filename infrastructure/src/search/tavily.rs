//! Tavily search adapter
//!
//! `POST {base_url}/search` with a bearer API key. Each result's `content`
//! field becomes the hit's snippet.

use crate::config::FileTavilyConfig;
use crate::providers::build_http_client;
use async_trait::async_trait;
use scribe_application::ports::search_gateway::{SearchError, SearchGateway};
use scribe_domain::SearchHit;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Tavily accepts at most this many results per request.
const MAX_RESULTS_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

pub struct TavilySearchGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    search_depth: String,
}

impl TavilySearchGateway {
    /// Create a gateway from `[search.tavily]` settings.
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &FileTavilyConfig, timeout: Option<Duration>) -> Result<Self, SearchError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            SearchError::AuthenticationFailed(format!(
                "Tavily API key is required. Set the {} environment variable.",
                config.api_key_env
            ))
        })?;

        let client = build_http_client(timeout).map_err(|e| {
            SearchError::ConnectionError(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: format!("{}/search", config.base_url.trim_end_matches('/')),
            api_key,
            search_depth: config.search_depth.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchGateway for TavilySearchGateway {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let request = SearchRequest {
            query,
            max_results: max_results.clamp(1, MAX_RESULTS_LIMIT),
            search_depth: &self.search_depth,
            include_answer: false,
        };

        debug!(query = %query, max_results = request.max_results, "Sending Tavily search");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => SearchError::AuthenticationFailed(body.trim().to_string()),
                code => SearchError::Api {
                    status: code,
                    message: body.trim().to_string(),
                },
            });
        }

        let mut hits = parse_search_response(&body)?;
        hits.truncate(max_results);
        Ok(hits)
    }
}

/// Parse a Tavily response body into hits, in returned order.
fn parse_search_response(body: &str) -> Result<Vec<SearchHit>, SearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

    Ok(response
        .results
        .into_iter()
        .map(|r| SearchHit::new(r.title.trim(), r.url.trim(), r.content))
        .collect())
}

fn map_transport_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::ConnectionError(e.to_string())
    }
}
