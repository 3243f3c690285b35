//! Research configuration from TOML (`[research]` section)

use super::ConfigValidationError;
use scribe_application::ResearchParams;
use scribe_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline limits and model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResearchConfig {
    /// Model used for splitting, drafting and reflection
    pub model: Model,
    /// Requests up to this many characters skip query splitting
    pub max_query_length: usize,
    pub min_queries: usize,
    pub max_queries: usize,
    /// Search results kept per query
    pub max_sources_per_query: usize,
    /// Searches in flight at once
    pub search_concurrency: usize,
    /// Timeout in seconds for every LLM and search call
    pub timeout_seconds: u64,
    pub split_max_tokens: u32,
    pub draft_max_tokens: u32,
    pub reflect_max_tokens: u32,
}

impl Default for FileResearchConfig {
    fn default() -> Self {
        let params = ResearchParams::default();
        Self {
            model: params.model,
            max_query_length: params.max_query_length,
            min_queries: params.min_queries,
            max_queries: params.max_queries,
            max_sources_per_query: params.max_sources_per_query,
            search_concurrency: params.search_concurrency,
            timeout_seconds: params.timeout.map(|t| t.as_secs()).unwrap_or(30),
            split_max_tokens: params.split_max_tokens,
            draft_max_tokens: params.draft_max_tokens,
            reflect_max_tokens: params.reflect_max_tokens,
        }
    }
}

impl FileResearchConfig {
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.model.as_str().trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if self.min_queries == 0 || self.min_queries > self.max_queries {
            issues.push(ConfigValidationError::InvalidQueryRange {
                min: self.min_queries,
                max: self.max_queries,
            });
        }

        let limits = [
            ("research.max_query_length", self.max_query_length),
            ("research.max_sources_per_query", self.max_sources_per_query),
            ("research.search_concurrency", self.search_concurrency),
        ];
        for (field, value) in limits {
            if value == 0 {
                issues.push(ConfigValidationError::ZeroLimit { field });
            }
        }

        issues
    }

    /// Convert to use-case parameters.
    pub fn to_params(&self) -> ResearchParams {
        ResearchParams {
            model: self.model.clone(),
            max_query_length: self.max_query_length,
            min_queries: self.min_queries,
            max_queries: self.max_queries,
            max_sources_per_query: self.max_sources_per_query,
            search_concurrency: self.search_concurrency,
            timeout: (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds)),
            split_max_tokens: self.split_max_tokens,
            draft_max_tokens: self.draft_max_tokens,
            reflect_max_tokens: self.reflect_max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_params() {
        let config = FileResearchConfig::default();
        assert_eq!(config.to_params(), ResearchParams::default());
    }

    #[test]
    fn test_zero_limits_reported() {
        let config = FileResearchConfig {
            max_sources_per_query: 0,
            search_concurrency: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&ConfigValidationError::ZeroLimit {
            field: "research.max_sources_per_query"
        }));
    }

    #[test]
    fn test_empty_model_reported() {
        let config: FileResearchConfig = toml::from_str("model = \"\"").unwrap();
        assert!(config.validate().contains(&ConfigValidationError::EmptyModelName));
    }
}
