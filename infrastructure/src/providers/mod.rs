//! LLM provider adapters
//!
//! Each provider implements the [`LlmGateway`](scribe_application::LlmGateway)
//! port over its own wire protocol.

pub mod openai;

pub use openai::OpenAiGateway;

use std::time::Duration;

/// Build the shared HTTP client for a provider.
///
/// Errors when the TLS backend cannot be initialized.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("scribe/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
