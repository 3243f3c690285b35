//! Research parameters: use case control.
//!
//! [`ResearchParams`] groups the static parameters that control a
//! [`RunResearchUseCase`](crate::use_cases::run_research::RunResearchUseCase)
//! run. They are passed explicitly to every use case; nothing is read from
//! globals.

use scribe_domain::{DomainError, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Control parameters for one research run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchParams {
    /// Model used for every LLM stage
    pub model: Model,
    /// Requests up to this many characters are searched as-is
    pub max_query_length: usize,
    /// Fewest queries accepted from the splitter
    pub min_queries: usize,
    /// Most queries accepted from the splitter
    pub max_queries: usize,
    /// Search results kept per query
    pub max_sources_per_query: usize,
    /// Searches allowed in flight at once
    pub search_concurrency: usize,
    /// Bound on every external call (`None` = unbounded)
    pub timeout: Option<Duration>,
    pub split_max_tokens: u32,
    pub draft_max_tokens: u32,
    pub reflect_max_tokens: u32,
}

impl Default for ResearchParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            max_query_length: 150,
            min_queries: 2,
            max_queries: 5,
            max_sources_per_query: 5,
            search_concurrency: 4,
            timeout: Some(Duration::from_secs(30)),
            split_max_tokens: 500,
            draft_max_tokens: 3000,
            reflect_max_tokens: 10000,
        }
    }
}

impl ResearchParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_query_length(mut self, max: usize) -> Self {
        self.max_query_length = max;
        self
    }

    pub fn with_query_range(mut self, min: usize, max: usize) -> Self {
        self.min_queries = min;
        self.max_queries = max;
        self
    }

    pub fn with_max_sources_per_query(mut self, max: usize) -> Self {
        self.max_sources_per_query = max;
        self
    }

    pub fn with_search_concurrency(mut self, concurrency: usize) -> Self {
        self.search_concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout from seconds; `0` disables it.
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        let timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self.with_timeout(timeout)
    }

    /// Reject combinations no run can satisfy.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_query_length == 0 {
            return Err(DomainError::InvalidParams(
                "max_query_length must be greater than 0".to_string(),
            ));
        }
        if self.min_queries == 0 || self.min_queries > self.max_queries {
            return Err(DomainError::InvalidParams(format!(
                "query range {}..={} is empty or starts at 0",
                self.min_queries, self.max_queries
            )));
        }
        if self.max_sources_per_query == 0 {
            return Err(DomainError::InvalidParams(
                "max_sources_per_query must be greater than 0".to_string(),
            ));
        }
        if self.search_concurrency == 0 {
            return Err(DomainError::InvalidParams(
                "search_concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
