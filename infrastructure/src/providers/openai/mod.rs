//! OpenAI-compatible chat completions provider
//!
//! Works against `api.openai.com` and any server exposing the same
//! `/chat/completions` endpoint (set `providers.openai.base_url`).

mod gateway;
mod session;
mod types;

pub use gateway::OpenAiGateway;
pub use session::OpenAiSession;
