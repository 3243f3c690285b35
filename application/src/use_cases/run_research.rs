//! Run Research use case
//!
//! Orchestrates a full research run:
//!
//! ```text
//! Split ──▶ Aggregate ──▶ Draft ──▶ Reflect ──▶ Done
//! ```
//!
//! Splitting never fails (it degrades to the bare topic). A search failure,
//! an empty source set, or a failed LLM call in Draft or Reflect aborts the
//! run; nothing is retried.

use crate::config::ResearchParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::research_history::{HistoryRecord, NoHistory, ResearchHistory};
use crate::ports::search_gateway::SearchGateway;
use crate::use_cases::aggregate_sources::{AggregateError, AggregateSourcesUseCase};
use crate::use_cases::reflect_draft::{ReflectDraftError, ReflectDraftUseCase};
use crate::use_cases::shared::{cancellable, check_cancelled};
use crate::use_cases::split_queries::SplitQueriesUseCase;
use crate::use_cases::write_draft::{WriteDraftError, WriteDraftUseCase};
use chrono::Utc;
use scribe_domain::{DomainError, Phase, ResearchRequest, ResearchResult};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Errors that can end a research run
#[derive(Error, Debug)]
pub enum RunResearchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Search failed for query '{query}': {message}")]
    SearchFailure { query: String, message: String },

    #[error("Search failed: no sources found for {queries} queries")]
    NoSources { queries: usize },

    #[error("Generation failed during {phase}: {message}")]
    GenerationFailure { phase: Phase, message: String },

    #[error("Research cancelled")]
    Cancelled,
}

impl RunResearchError {
    /// `true` for both flavours of search failure.
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            RunResearchError::SearchFailure { .. } | RunResearchError::NoSources { .. }
        )
    }
}

impl From<AggregateError> for RunResearchError {
    fn from(e: AggregateError) -> Self {
        match e {
            AggregateError::SearchFailure { query, source } => RunResearchError::SearchFailure {
                query,
                message: source.to_string(),
            },
        }
    }
}

impl From<WriteDraftError> for RunResearchError {
    fn from(e: WriteDraftError) -> Self {
        RunResearchError::GenerationFailure {
            phase: Phase::Draft,
            message: e.to_string(),
        }
    }
}

impl From<ReflectDraftError> for RunResearchError {
    fn from(e: ReflectDraftError) -> Self {
        RunResearchError::GenerationFailure {
            phase: Phase::Reflect,
            message: e.to_string(),
        }
    }
}

/// Input for the RunResearch use case
#[derive(Debug, Clone)]
pub struct RunResearchInput {
    pub request: ResearchRequest,
    pub params: ResearchParams,
}

impl RunResearchInput {
    pub fn new(request: ResearchRequest) -> Self {
        Self {
            request,
            params: ResearchParams::default(),
        }
    }

    pub fn with_params(mut self, params: ResearchParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for running a complete research pipeline
pub struct RunResearchUseCase<G: LlmGateway + 'static, S: SearchGateway + 'static> {
    gateway: Arc<G>,
    search: Arc<S>,
    history: Arc<dyn ResearchHistory>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static, S: SearchGateway + 'static> RunResearchUseCase<G, S> {
    pub fn new(gateway: Arc<G>, search: Arc<S>) -> Self {
        Self {
            gateway,
            search,
            history: Arc::new(NoHistory),
            cancellation_token: None,
        }
    }

    /// Record every completed run in `history`.
    pub fn with_history(mut self, history: Arc<dyn ResearchHistory>) -> Self {
        self.history = history;
        self
    }

    /// Set a cancellation token for graceful shutdown
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunResearchInput) -> Result<ResearchResult, RunResearchError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunResearchInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchResult, RunResearchError> {
        let RunResearchInput { request, params } = input;
        params.validate()?;

        info!("Starting research on '{}'", request.topic());
        let token = &self.cancellation_token;

        // Phase 1: Split
        check_cancelled(token)?;
        let splitter = SplitQueriesUseCase::new(Arc::clone(&self.gateway));
        let queries = cancellable(
            token,
            splitter.execute_with_progress(&request, &params, progress),
        )
        .await?;

        // Phase 2: Aggregate
        check_cancelled(token)?;
        let aggregator = AggregateSourcesUseCase::new(Arc::clone(&self.search));
        let collected = cancellable(
            token,
            aggregator.execute_with_progress(&queries, &params, progress),
        )
        .await??;
        if collected.sources.is_empty() {
            return Err(RunResearchError::NoSources {
                queries: queries.len(),
            });
        }

        // Phase 3: Draft
        check_cancelled(token)?;
        let writer = WriteDraftUseCase::new(Arc::clone(&self.gateway));
        let draft = cancellable(
            token,
            writer.execute_with_progress(&request, &collected.sources, &params, progress),
        )
        .await??;

        // Phase 4: Reflect
        check_cancelled(token)?;
        let reflector = ReflectDraftUseCase::new(Arc::clone(&self.gateway));
        let reflection = cancellable(
            token,
            reflector.execute_with_progress(&request, &draft, &collected.sources, &params, progress),
        )
        .await??;

        let result = ResearchResult {
            topic: request.topic().to_string(),
            requirements: request.requirements().map(str::to_string),
            queries,
            sources: collected.sources,
            draft,
            reflection,
            stats: collected.stats,
        };

        info!(
            "Research complete: {} queries, {} sources, {} claims removed",
            result.stats.queries_executed,
            result.stats.sources_collected,
            result.reflection.removed_claims.len()
        );
        self.history
            .record(HistoryRecord::from_result(&result, Utc::now()));
        progress.on_phase_complete(&Phase::Done, "");

        Ok(result)
    }
}
