//! Application layer for scribe
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ResearchParams;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
    research_history::{HistoryError, HistoryRecord, NoHistory, ResearchHistory},
    search_gateway::{SearchError, SearchGateway},
};
pub use use_cases::aggregate_sources::{AggregateError, AggregateOutput, AggregateSourcesUseCase};
pub use use_cases::reflect_draft::{ReflectDraftError, ReflectDraftUseCase};
pub use use_cases::run_research::{RunResearchError, RunResearchInput, RunResearchUseCase};
pub use use_cases::split_queries::{SplitError, SplitQueriesUseCase};
pub use use_cases::write_draft::{WriteDraftError, WriteDraftUseCase};
