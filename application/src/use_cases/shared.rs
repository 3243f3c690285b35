//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the timeout-bounded gateway calls
//! used by every stage.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::search_gateway::{SearchError, SearchGateway};
use crate::use_cases::run_research::RunResearchError;
use scribe_domain::{Model, SearchHit};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(RunResearchError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), RunResearchError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(RunResearchError::Cancelled);
    }
    Ok(())
}

/// Drive `future` to completion unless the token fires first.
pub(crate) async fn cancellable<F: Future>(
    token: &Option<CancellationToken>,
    future: F,
) -> Result<F::Output, RunResearchError> {
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(RunResearchError::Cancelled),
                output = future => Ok(output),
            }
        }
        None => Ok(future.await),
    }
}

/// One system + user prompt round trip, bounded by `timeout`.
///
/// A blank completion is reported as [`GatewayError::EmptyResponse`].
pub(crate) async fn complete<G: LlmGateway + ?Sized>(
    gateway: &G,
    model: &Model,
    system_prompt: &str,
    prompt: &str,
    max_tokens: u32,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    let call = async {
        let session = gateway
            .create_session_with_system_prompt(model, system_prompt, Some(max_tokens))
            .await?;
        session.send(prompt).await
    };

    let text = match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| GatewayError::Timeout)??,
        None => call.await?,
    };

    if text.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(text)
}

/// One search call, bounded by `timeout`.
pub(crate) async fn search<S: SearchGateway + ?Sized>(
    gateway: &S,
    query: &str,
    max_results: usize,
    timeout: Option<Duration>,
) -> Result<Vec<SearchHit>, SearchError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, gateway.search(query, max_results))
            .await
            .map_err(|_| SearchError::Timeout)?,
        None => gateway.search(query, max_results).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;

    #[test]
    fn test_check_cancelled() {
        assert!(check_cancelled(&None).is_ok());

        let token = CancellationToken::new();
        assert!(check_cancelled(&Some(token.clone())).is_ok());
        token.cancel();
        assert!(matches!(
            check_cancelled(&Some(token)),
            Err(RunResearchError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_cancellable_returns_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let result = cancellable(&Some(token), std::future::pending::<()>()).await;
        assert!(matches!(result, Err(RunResearchError::Cancelled)));
    }

    #[tokio::test]
    async fn test_complete_rejects_blank_text() {
        let gateway = MockGateway::new(vec![Ok("   \n".to_string())]);
        let result = complete(&gateway, &Model::default(), "sys", "hi", 10, None).await;
        assert!(matches!(result, Err(GatewayError::EmptyResponse)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_times_out() {
        let gateway = MockGateway::new(vec![Ok("late".to_string())])
            .with_delay(Duration::from_secs(60));
        let result = complete(
            &gateway,
            &Model::default(),
            "sys",
            "hi",
            10,
            Some(Duration::from_secs(5)),
        )
        .await;
        assert!(matches!(result, Err(GatewayError::Timeout)));
    }
}
