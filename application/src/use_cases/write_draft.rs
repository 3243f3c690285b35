//! Write Draft use case
//!
//! Asks the LLM for a research draft that cites only the collected sources.

use crate::config::ResearchParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::complete;
use scribe_domain::{Draft, Phase, PromptTemplate, ResearchRequest, SourceSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while writing the draft
#[derive(Error, Debug)]
pub enum WriteDraftError {
    #[error("No sources to cite")]
    NoSources,

    #[error("{0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for writing the first draft
pub struct WriteDraftUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> WriteDraftUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: &ResearchRequest,
        sources: &SourceSet,
        params: &ResearchParams,
    ) -> Result<Draft, WriteDraftError> {
        self.execute_with_progress(request, sources, params, &NoProgress)
            .await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: &ResearchRequest,
        sources: &SourceSet,
        params: &ResearchParams,
        progress: &dyn ProgressNotifier,
    ) -> Result<Draft, WriteDraftError> {
        if sources.is_empty() {
            return Err(WriteDraftError::NoSources);
        }

        info!("Writing draft from {} sources", sources.len());
        progress.on_phase_start(&Phase::Draft, 1);

        let prompt = PromptTemplate::draft_prompt(request.topic(), request.requirements(), sources);
        let text = complete(
            self.gateway.as_ref(),
            &params.model,
            PromptTemplate::draft_system(),
            &prompt,
            params.draft_max_tokens,
            params.timeout,
        )
        .await?;

        let draft = Draft::from_text(text, sources);
        if draft.has_broken_citations() {
            // reflection strips these; only note them here
            debug!(
                "Draft contains {} unresolved citations: {:?}",
                draft.broken_citations.len(),
                draft.broken_citations
            );
        }

        progress.on_phase_complete(
            &Phase::Draft,
            &format!("{} sources cited", draft.cited_source_urls.len()),
        );
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;
    use scribe_domain::{SearchHit, Source};

    fn sources() -> SourceSet {
        ["https://a.com/1", "https://b.com/2"]
            .iter()
            .map(|u| Source::from_hit(SearchHit::new("t", *u, "s"), "q"))
            .collect()
    }

    #[tokio::test]
    async fn test_draft_extracts_cited_urls() {
        let gateway = Arc::new(MockGateway::new(vec![Ok(
            "Intro.\n\nFinding one [Source 2]. Finding two [Source 1].\n\n## Sources\n[Source 1] t - https://a.com/1"
                .to_string(),
        )]));
        let use_case = WriteDraftUseCase::new(Arc::clone(&gateway));
        let request = ResearchRequest::new("Rust").unwrap();

        let draft = use_case
            .execute(&request, &sources(), &ResearchParams::default())
            .await
            .unwrap();

        assert_eq!(draft.cited_source_urls, vec!["https://b.com/2", "https://a.com/1"]);
        assert!(!draft.has_broken_citations());

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].max_tokens, Some(3000));
        assert!(calls[0].prompt.contains("URL: https://b.com/2"));
    }

    #[tokio::test]
    async fn test_empty_sources_rejected_without_llm_call() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let use_case = WriteDraftUseCase::new(Arc::clone(&gateway));
        let request = ResearchRequest::new("Rust").unwrap();

        let err = use_case
            .execute(&request, &SourceSet::new(), &ResearchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, WriteDraftError::NoSources));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::ModelNotAvailable(
            "gpt-x".to_string(),
        ))]));
        let use_case = WriteDraftUseCase::new(gateway);
        let request = ResearchRequest::new("Rust").unwrap();

        let err = use_case
            .execute(&request, &sources(), &ResearchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WriteDraftError::Gateway(GatewayError::ModelNotAvailable(_))
        ));
    }
}
