//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod history;
mod output;
mod providers;
mod research;
mod search;

pub use history::FileHistoryConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileOpenAiConfig, FileProvidersConfig};
pub use research::FileResearchConfig;
pub use search::{FileSearchConfig, FileTavilyConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("research.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("research.model cannot be empty")]
    EmptyModelName,

    #[error("research.min_queries ({min}) must be between 1 and research.max_queries ({max})")]
    InvalidQueryRange { min: usize, max: usize },

    #[error("{field} must be greater than 0")]
    ZeroLimit { field: &'static str },

    #[error("providers.openai.temperature {0} is outside 0.0..=2.0")]
    InvalidTemperature(f32),

    #[error("search.tavily.search_depth must be \"basic\" or \"advanced\", got \"{0}\"")]
    InvalidSearchDepth(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Pipeline limits and model selection
    pub research: FileResearchConfig,
    /// LLM provider settings
    pub providers: FileProvidersConfig,
    /// Search API settings
    pub search: FileSearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Research history settings
    pub history: FileHistoryConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every issue found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = self.research.validate();

        let temperature = self.providers.openai.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            issues.push(ConfigValidationError::InvalidTemperature(temperature));
        }

        let depth = self.search.tavily.search_depth.as_str();
        if depth != "basic" && depth != "advanced" {
            issues.push(ConfigValidationError::InvalidSearchDepth(depth.to_string()));
        }

        issues
    }
}
