//! Reflect Draft use case
//!
//! Has the LLM re-check every claim of a draft against the source list,
//! then runs the deterministic citation-integrity pass over its answer.

use crate::config::ResearchParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::complete;
use scribe_domain::{
    Draft, Phase, PromptTemplate, ReflectionResult, ResearchRequest, SourceSet,
    parse_reflection_response,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during reflection
#[derive(Error, Debug)]
pub enum ReflectDraftError {
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("Reflection returned an empty final draft")]
    EmptyFinalDraft,
}

/// Use case for validating and improving a draft
pub struct ReflectDraftUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> ReflectDraftUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: &ResearchRequest,
        draft: &Draft,
        sources: &SourceSet,
        params: &ResearchParams,
    ) -> Result<ReflectionResult, ReflectDraftError> {
        self.execute_with_progress(request, draft, sources, params, &NoProgress)
            .await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: &ResearchRequest,
        draft: &Draft,
        sources: &SourceSet,
        params: &ResearchParams,
        progress: &dyn ProgressNotifier,
    ) -> Result<ReflectionResult, ReflectDraftError> {
        info!("Reflecting on draft ({} chars)", draft.text.len());
        progress.on_phase_start(&Phase::Reflect, 1);

        let prompt = PromptTemplate::reflection_prompt(
            request.topic(),
            request.requirements(),
            draft,
            sources,
        );
        let response = complete(
            self.gateway.as_ref(),
            &params.model,
            PromptTemplate::reflection_system(),
            &prompt,
            params.reflect_max_tokens,
            params.timeout,
        )
        .await?;

        let parsed = parse_reflection_response(&response);
        if parsed.final_text.trim().is_empty() {
            return Err(ReflectDraftError::EmptyFinalDraft);
        }

        let result = ReflectionResult::from_response(parsed, sources);
        for defect in &result.integrity_defects {
            warn!("Citation integrity defect, removed sentence: {}", defect);
        }

        info!(
            "Reflection removed {} claims ({} by integrity pass)",
            result.removed_claims.len(),
            result.integrity_defects.len()
        );
        progress.on_phase_complete(
            &Phase::Reflect,
            &format!("{} claims removed", result.removed_claims.len()),
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;
    use scribe_domain::{SearchHit, Source};

    fn three_sources() -> SourceSet {
        ["https://a.com/1", "https://b.com/2", "https://c.com/3"]
            .iter()
            .map(|u| Source::from_hit(SearchHit::new("t", *u, "s"), "q"))
            .collect()
    }

    fn request() -> ResearchRequest {
        ResearchRequest::new("Rust adoption").unwrap()
    }

    #[tokio::test]
    async fn test_unknown_url_stripped_even_if_model_keeps_it() {
        let sources = three_sources();
        let draft = Draft::from_text(
            "Rust is memory safe [Source 1]. Rust runs on Mars [http://unknown.com].",
            &sources,
        );
        let gateway = Arc::new(MockGateway::new(vec![Ok(
            "FINAL DRAFT:\nRust is memory safe [Source 1]. Rust runs on Mars [http://unknown.com].\nREMOVED CLAIMS:\nNone\nCHANGES SUMMARY:\nNo changes needed."
                .to_string(),
        )]));
        let use_case = ReflectDraftUseCase::new(Arc::clone(&gateway));

        let result = use_case
            .execute(&request(), &draft, &sources, &ResearchParams::default())
            .await
            .unwrap();

        assert_eq!(result.final_text, "Rust is memory safe [Source 1].");
        assert!(!result.final_text.contains("unknown.com"));
        assert_eq!(
            result.removed_claims,
            vec!["Rust runs on Mars [http://unknown.com]."]
        );
        assert_eq!(result.source_usage.get("https://a.com/1"), Some(&1));
        assert_eq!(result.changes_summary, "No changes needed.");

        let calls = gateway.calls();
        assert_eq!(calls[0].max_tokens, Some(10000));
        assert!(calls[0].prompt.contains("Rust runs on Mars"));
    }

    #[tokio::test]
    async fn test_unknown_url_in_links_and_parentheses_stripped() {
        let sources = three_sources();
        let leaks = [
            "Rust runs on Mars (http://unknown.com).",
            "Rust runs on [Mars](http://unknown.com).",
            "Rust runs on Mars [http://unknown.com, p. 4].",
            "Rust runs on Mars [Source 1](http://unknown.com).",
        ];
        let text = format!("Rust is memory safe [Source 1]. {}", leaks.join(" "));
        let draft = Draft::from_text(text.clone(), &sources);
        assert_eq!(draft.broken_citations, vec!["http://unknown.com"]);

        let gateway = Arc::new(MockGateway::new(vec![Ok(format!(
            "FINAL DRAFT:\n{text}\nREMOVED CLAIMS:\nNone\nCHANGES SUMMARY:\nNo changes needed."
        ))]));
        let use_case = ReflectDraftUseCase::new(gateway);

        let result = use_case
            .execute(&request(), &draft, &sources, &ResearchParams::default())
            .await
            .unwrap();

        assert_eq!(result.final_text, "Rust is memory safe [Source 1].");
        assert!(!result.final_text.contains("unknown.com"));
        assert_eq!(result.removed_claims, leaks.to_vec());
        assert_eq!(result.integrity_defects, leaks.to_vec());
    }

    #[tokio::test]
    async fn test_model_removals_are_reported() {
        let sources = three_sources();
        let draft = Draft::from_text("A [Source 1]. B [Source 2].", &sources);
        let gateway = Arc::new(MockGateway::new(vec![Ok(
            "FINAL DRAFT:\nA [Source 1].\nREMOVED CLAIMS:\n- B [Source 2].\nCHANGES SUMMARY:\nRemoved B, not supported."
                .to_string(),
        )]));
        let use_case = ReflectDraftUseCase::new(gateway);

        let result = use_case
            .execute(&request(), &draft, &sources, &ResearchParams::default())
            .await
            .unwrap();

        assert_eq!(result.final_text, "A [Source 1].");
        assert_eq!(result.removed_claims, vec!["B [Source 2]."]);
        assert!(!result.has_integrity_defects());
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let sources = three_sources();
        let draft = Draft::from_text("A [Source 1].", &sources);
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Timeout)]));
        let use_case = ReflectDraftUseCase::new(gateway);

        let err = use_case
            .execute(&request(), &draft, &sources, &ResearchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ReflectDraftError::Gateway(GatewayError::Timeout)));
    }

    #[tokio::test]
    async fn test_empty_final_draft_is_an_error() {
        let sources = three_sources();
        let draft = Draft::from_text("A [Source 1].", &sources);
        let gateway = Arc::new(MockGateway::new(vec![Ok(
            "FINAL DRAFT:\n\nREMOVED CLAIMS:\n- A [Source 1].".to_string(),
        )]));
        let use_case = ReflectDraftUseCase::new(gateway);

        let err = use_case
            .execute(&request(), &draft, &sources, &ResearchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ReflectDraftError::EmptyFinalDraft));
    }
}
