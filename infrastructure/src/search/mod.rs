//! Web search adapters
//!
//! Implementations of the [`SearchGateway`](scribe_application::SearchGateway) port.

mod tavily;

pub use tavily::TavilySearchGateway;
