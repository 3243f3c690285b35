//! Split Queries use case
//!
//! Turns a research request into the list of queries sent to the search API.
//! Short requests are searched as-is; longer ones are decomposed by the LLM.
//! Every failure degrades to searching the topic alone.

use crate::config::ResearchParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::complete;
use scribe_domain::{Phase, PromptTemplate, ResearchRequest, parse_query_list};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why decomposition was abandoned. Never surfaced past this use case.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("LLM call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("no queries could be parsed from the response")]
    Unparseable,

    #[error("expected {min} to {max} queries, got {count}")]
    CountOutOfRange { count: usize, min: usize, max: usize },
}

/// Use case for splitting a request into search queries
pub struct SplitQueriesUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> SplitQueriesUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, request: &ResearchRequest, params: &ResearchParams) -> Vec<String> {
        self.execute_with_progress(request, params, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Always returns at least one query.
    pub async fn execute_with_progress(
        &self,
        request: &ResearchRequest,
        params: &ResearchParams,
        progress: &dyn ProgressNotifier,
    ) -> Vec<String> {
        progress.on_phase_start(&Phase::Split, 1);

        let length = request.full_text().chars().count();
        let queries = if length <= params.max_query_length {
            debug!(
                "Request is {} chars (limit {}), searching topic as-is",
                length, params.max_query_length
            );
            vec![request.topic().to_string()]
        } else {
            match self.decompose(request, params).await {
                Ok(queries) => {
                    info!("Split request into {} queries", queries.len());
                    queries
                }
                Err(e) => {
                    warn!("Query splitting failed, searching topic as-is: {}", e);
                    vec![request.topic().to_string()]
                }
            }
        };

        progress.on_phase_complete(&Phase::Split, &plural(queries.len(), "query", "queries"));
        queries
    }

    /// Ask the LLM for focused queries. Does not fall back.
    pub async fn decompose(
        &self,
        request: &ResearchRequest,
        params: &ResearchParams,
    ) -> Result<Vec<String>, SplitError> {
        let prompt = PromptTemplate::split_prompt(
            request.topic(),
            request.requirements(),
            params.min_queries,
            params.max_queries,
            params.max_query_length,
        );

        let response = complete(
            self.gateway.as_ref(),
            &params.model,
            PromptTemplate::split_system(),
            &prompt,
            params.split_max_tokens,
            params.timeout,
        )
        .await?;

        let queries = parse_query_list(&response);
        if queries.is_empty() {
            return Err(SplitError::Unparseable);
        }
        if !(params.min_queries..=params.max_queries).contains(&queries.len()) {
            return Err(SplitError::CountOutOfRange {
                count: queries.len(),
                min: params.min_queries,
                max: params.max_queries,
            });
        }
        Ok(queries)
    }
}

pub(crate) fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;
    use std::time::Duration;

    fn long_request() -> ResearchRequest {
        ResearchRequest::new("Impact of artificial intelligence on healthcare delivery")
            .unwrap()
            .with_requirements(
                "Cover diagnostics, drug discovery, hospital operations and patient privacy, \
                 with emphasis on peer-reviewed studies from the last five years",
            )
    }

    fn use_case(gateway: MockGateway) -> (Arc<MockGateway>, SplitQueriesUseCase<MockGateway>) {
        let gateway = Arc::new(gateway);
        (Arc::clone(&gateway), SplitQueriesUseCase::new(gateway))
    }

    #[tokio::test]
    async fn test_short_request_makes_no_llm_call() {
        let (gateway, use_case) = use_case(MockGateway::new(vec![]));
        let request = ResearchRequest::new("AI").unwrap();

        let queries = use_case.execute(&request, &ResearchParams::default()).await;

        assert_eq!(queries, vec!["AI".to_string()]);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_not_part_of_the_query() {
        let (gateway, use_case) = use_case(MockGateway::new(vec![]));
        let request = ResearchRequest::new("  AI \n").unwrap();

        let queries = use_case.execute(&request, &ResearchParams::default()).await;

        assert_eq!(queries, vec!["AI".to_string()]);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_length_equal_to_threshold_makes_no_llm_call() {
        let (gateway, use_case) = use_case(MockGateway::new(vec![]));
        let topic = "é".repeat(150);
        let request = ResearchRequest::new(topic.clone()).unwrap();
        let params = ResearchParams::default();
        assert_eq!(params.max_query_length, 150);

        let queries = use_case.execute(&request, &params).await;

        assert_eq!(queries, vec![topic]);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_length_one_over_threshold_makes_one_llm_call() {
        let (gateway, use_case) = use_case(MockGateway::new(vec![Ok(
            "1. first focused query\n2. second focused query".to_string(),
        )]));
        let request = ResearchRequest::new("a".repeat(151)).unwrap();

        let queries = use_case.execute(&request, &ResearchParams::default()).await;

        assert_eq!(queries, vec!["first focused query", "second focused query"]);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_length_counts_requirements() {
        let (gateway, use_case) = use_case(MockGateway::new(vec![Ok(
            "1. AI diagnostics accuracy\n2. AI drug discovery".to_string(),
        )]));
        let request = ResearchRequest::new("AI").unwrap().with_requirements("x".repeat(200));

        let queries = use_case.execute(&request, &ResearchParams::default()).await;

        assert_eq!(queries.len(), 2);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_long_request_is_split() {
        let (gateway, use_case) = use_case(MockGateway::new(vec![Ok(
            "Here are the queries:\n1. AI diagnostic imaging accuracy studies\n2. AI in drug discovery pipelines\n3. Patient data privacy in clinical AI"
                .to_string(),
        )]));

        let queries = use_case
            .execute(&long_request(), &ResearchParams::default())
            .await;

        assert_eq!(
            queries,
            vec![
                "AI diagnostic imaging accuracy studies",
                "AI in drug discovery pipelines",
                "Patient data privacy in clinical AI",
            ]
        );
        let calls = gateway.calls();
        assert_eq!(calls[0].max_tokens, Some(500));
        assert!(calls[0].prompt.contains("between 2 and 5 queries"));
    }

    #[tokio::test]
    async fn test_gateway_failure_falls_back_to_topic() {
        let (_, use_case) = use_case(MockGateway::new(vec![Err(GatewayError::RequestFailed(
            "503".to_string(),
        ))]));

        let queries = use_case
            .execute(&long_request(), &ResearchParams::default())
            .await;

        assert_eq!(
            queries,
            vec!["Impact of artificial intelligence on healthcare delivery"]
        );
    }

    #[tokio::test]
    async fn test_unparseable_response_falls_back() {
        let (_, use_case) = use_case(MockGateway::new(vec![Ok(
            "I cannot help with that.".to_string(),
        )]));
        let request = long_request();

        let err = use_case
            .decompose(&request, &ResearchParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SplitError::Unparseable));
    }

    #[tokio::test]
    async fn test_single_query_is_out_of_range() {
        let (_, use_case) = use_case(MockGateway::new(vec![
            Ok("1. Only one query here".to_string()),
            Ok("1. Only one query here".to_string()),
        ]));
        let request = long_request();
        let params = ResearchParams::default();

        let err = use_case.decompose(&request, &params).await.unwrap_err();
        assert!(matches!(
            err,
            SplitError::CountOutOfRange { count: 1, min: 2, max: 5 }
        ));

        let queries = use_case.execute(&request, &params).await;
        assert_eq!(queries, vec![request.topic().to_string()]);
    }

    #[tokio::test]
    async fn test_too_many_queries_fall_back() {
        let list = (1..=7)
            .map(|i| format!("{}. distinct query number {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        let (_, use_case) = use_case(MockGateway::new(vec![Ok(list)]));

        let queries = use_case
            .execute(&long_request(), &ResearchParams::default())
            .await;

        assert_eq!(queries.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let (_, use_case) = use_case(
            MockGateway::new(vec![Ok("1. a query\n2. b query".to_string())])
                .with_delay(Duration::from_secs(120)),
        );

        let queries = use_case
            .execute(&long_request(), &ResearchParams::default())
            .await;

        assert_eq!(queries.len(), 1);
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "query", "queries"), "1 query");
        assert_eq!(plural(3, "query", "queries"), "3 queries");
    }
}
