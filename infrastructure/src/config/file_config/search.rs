//! Search API configuration from TOML (`[search]` section)

use super::providers::resolve_key;
use serde::{Deserialize, Serialize};

/// Tavily search API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTavilyConfig {
    /// Environment variable name for the API key (default: "TAVILY_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    pub base_url: String,
    /// "basic" or "advanced"
    pub search_depth: String,
}

impl Default for FileTavilyConfig {
    fn default() -> Self {
        Self {
            api_key_env: "TAVILY_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.tavily.com".to_string(),
            search_depth: "advanced".to_string(),
        }
    }
}

impl FileTavilyConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub tavily: FileTavilyConfig,
}
