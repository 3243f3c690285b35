//! Aggregate Sources use case
//!
//! Runs every query through the search gateway and merges the hits into one
//! deduplicated [`SourceSet`]. Searches run concurrently but results are
//! merged in query order, so the output is the same as a sequential run.

use crate::config::ResearchParams;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::search_gateway::{SearchError, SearchGateway};
use crate::use_cases::shared::search;
use crate::use_cases::split_queries::plural;
use futures::stream::{self, StreamExt};
use scribe_domain::{Phase, ResearchStats, Source, SourceSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while collecting sources
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Search failed for query '{query}': {source}")]
    SearchFailure {
        query: String,
        #[source]
        source: SearchError,
    },
}

/// Sources collected for a run, with counters
#[derive(Debug, Clone, Default)]
pub struct AggregateOutput {
    pub sources: SourceSet,
    pub stats: ResearchStats,
}

/// Use case for collecting sources from several queries
pub struct AggregateSourcesUseCase<S: SearchGateway + 'static> {
    search: Arc<S>,
}

impl<S: SearchGateway + 'static> AggregateSourcesUseCase<S> {
    pub fn new(search: Arc<S>) -> Self {
        Self { search }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        queries: &[String],
        params: &ResearchParams,
    ) -> Result<AggregateOutput, AggregateError> {
        self.execute_with_progress(queries, params, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// The first failing query (in query order) aborts the whole aggregation.
    pub async fn execute_with_progress(
        &self,
        queries: &[String],
        params: &ResearchParams,
        progress: &dyn ProgressNotifier,
    ) -> Result<AggregateOutput, AggregateError> {
        info!("Collecting sources from {} queries", queries.len());
        progress.on_phase_start(&Phase::Aggregate, queries.len());

        let limit = params.max_sources_per_query;
        let timeout = params.timeout;

        let mut results = stream::iter(queries)
            .map(|query| {
                let gateway = Arc::clone(&self.search);
                async move {
                    let result = search(gateway.as_ref(), query, limit, timeout).await;
                    (query, result)
                }
            })
            .buffered(params.search_concurrency.max(1));

        let mut output = AggregateOutput::default();

        while let Some((query, result)) = results.next().await {
            let hits = match result {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("Search failed for query '{}': {}", query, e);
                    progress.on_task_complete(&Phase::Aggregate, query, false);
                    return Err(AggregateError::SearchFailure {
                        query: query.clone(),
                        source: e,
                    });
                }
            };

            output.stats.queries_executed += 1;
            let mut added = 0;
            for hit in hits.into_iter().take(limit) {
                let url = hit.url.clone();
                if output.sources.insert(Source::from_hit(hit, query.as_str())) {
                    added += 1;
                } else {
                    debug!("Dropping duplicate or empty source url '{}'", url);
                }
            }
            debug!("Query '{}' contributed {} new sources", query, added);
            progress.on_task_complete(&Phase::Aggregate, query, true);
        }

        output.stats.sources_collected = output.sources.len();
        info!(
            "Collected {} unique sources from {} queries",
            output.stats.sources_collected, output.stats.queries_executed
        );
        progress.on_phase_complete(
            &Phase::Aggregate,
            &plural(output.stats.sources_collected, "source", "sources"),
        );
        Ok(output)
    }
}
