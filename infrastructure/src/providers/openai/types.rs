//! Wire types for the chat completions endpoint

use scribe_application::ports::llm_gateway::GatewayError;
use scribe_domain::Model;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role("assistant", content)
    }

    fn with_role(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

impl<'a> ChatRequest<'a> {
    /// Reasoning models take `max_completion_tokens` and no temperature.
    pub fn new(
        model: &'a Model,
        messages: &'a [ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Self {
        let reasoning = model.is_reasoning();
        Self {
            model: model.as_str(),
            messages,
            temperature: (!reasoning).then_some(temperature),
            max_tokens: if reasoning { None } else { max_tokens },
            max_completion_tokens: if reasoning { max_tokens } else { None },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the assistant text from a successful response body.
pub(crate) fn parse_completion(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::RequestFailed(format!("Malformed completion response: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(GatewayError::EmptyResponse)?;

    if choice.finish_reason.as_deref() == Some("length") {
        tracing::warn!("Completion was cut off at the token limit");
    }

    match choice.message.content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GatewayError::EmptyResponse),
    }
}

/// Map a non-success HTTP status to a gateway error.
pub(crate) fn http_error(status: u16, body: &str, model: &Model) -> GatewayError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        401 | 403 => GatewayError::AuthenticationFailed(message),
        404 => GatewayError::ModelNotAvailable(format!("{}: {}", model, message)),
        408 | 504 => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, message)),
    }
}
