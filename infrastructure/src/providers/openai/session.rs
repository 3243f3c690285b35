//! OpenAI LLM session implementation
//!
//! The chat completions API is stateless, so the session keeps the
//! conversation locally and resends it on every call.

use super::gateway::ClientHandle;
use super::types::{ChatMessage, ChatRequest, http_error, parse_completion};
use async_trait::async_trait;
use scribe_application::ports::llm_gateway::{GatewayError, LlmSession};
use scribe_domain::Model;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub struct OpenAiSession {
    client: Arc<ClientHandle>,
    model: Model,
    max_tokens: Option<u32>,
    messages: Mutex<Vec<ChatMessage>>,
}

impl OpenAiSession {
    pub(crate) fn new(
        client: Arc<ClientHandle>,
        model: Model,
        system_prompt: &str,
        max_tokens: Option<u32>,
    ) -> Self {
        let messages = if system_prompt.is_empty() {
            Vec::new()
        } else {
            vec![ChatMessage::system(system_prompt)]
        };
        Self {
            client,
            model,
            max_tokens,
            messages: Mutex::new(messages),
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.push(ChatMessage::user(content));

        let request = ChatRequest::new(
            &self.model,
            &messages,
            self.client.temperature,
            self.max_tokens,
        );

        debug!(
            model = %self.model,
            messages = messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .http
            .post(&self.client.endpoint)
            .bearer_auth(&self.client.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            // keep the history consistent for a retry by the caller
            messages.pop();
            return Err(http_error(status.as_u16(), &body, &self.model));
        }

        let text = parse_completion(&body)?;
        messages.push(ChatMessage::assistant(text.clone()));
        Ok(text)
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}
