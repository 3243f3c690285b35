//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completions provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Base URL of the API, up to and including the version segment.
    pub base_url: String,
    /// Sampling temperature for every stage.
    pub temperature: f32,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.4,
        }
    }
}

impl FileOpenAiConfig {
    /// API key from the config file, falling back to the configured env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
}

/// Prefer an inline key, else read `env_var`. Blank values count as unset.
pub(crate) fn resolve_key(inline: Option<&str>, env_var: &str) -> Option<String> {
    inline
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
