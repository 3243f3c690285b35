//! OpenAI gateway
//!
//! Implements [`LlmGateway`] by handing out [`OpenAiSession`]s that share
//! one HTTP client.

use super::session::OpenAiSession;
use crate::config::FileOpenAiConfig;
use crate::providers::build_http_client;
use async_trait::async_trait;
use scribe_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use scribe_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Connection details shared by every session
pub(crate) struct ClientHandle {
    pub http: reqwest::Client,
    pub endpoint: String,
    pub api_key: String,
    pub temperature: f32,
}

pub struct OpenAiGateway {
    client: Arc<ClientHandle>,
}

impl OpenAiGateway {
    /// Create a gateway from `[providers.openai]` settings.
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &FileOpenAiConfig, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GatewayError::AuthenticationFailed(format!(
                "OpenAI API key is required. Set the {} environment variable.",
                config.api_key_env
            ))
        })?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        info!(endpoint = %endpoint, "OpenAI provider initialized");

        let http = build_http_client(timeout).map_err(|e| {
            GatewayError::ConnectionError(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client: Arc::new(ClientHandle {
                http,
                endpoint,
                api_key,
                temperature: config.temperature,
            }),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.client.endpoint
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
        max_tokens: Option<u32>,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            Arc::clone(&self.client),
            model.clone(),
            system_prompt,
            max_tokens,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> FileOpenAiConfig {
        FileOpenAiConfig {
            api_key: Some("sk-test".to_string()),
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway = OpenAiGateway::new(&config("http://localhost:8080/v1/"), None).unwrap();
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let config = FileOpenAiConfig {
            api_key_env: "SCRIBE_TEST_NO_SUCH_OPENAI_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            OpenAiGateway::new(&config, None),
            Err(GatewayError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_session_reports_model() {
        let gateway = OpenAiGateway::new(&config("https://api.openai.com/v1"), None).unwrap();
        let session = gateway
            .create_session_with_system_prompt(&Model::Gpt4oMini, "sys", Some(100))
            .await
            .unwrap();
        assert_eq!(session.model(), &Model::Gpt4oMini);
    }
}
