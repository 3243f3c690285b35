//! Test doubles for the gateway ports.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::progress::ProgressNotifier;
use crate::ports::research_history::{HistoryError, HistoryRecord, ResearchHistory};
use crate::ports::search_gateway::{SearchError, SearchGateway};
use async_trait::async_trait;
use scribe_domain::{Model, Phase, SearchHit};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A prompt as it reached the model
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub system_prompt: String,
    pub prompt: String,
    pub max_tokens: Option<u32>,
}

/// Answers each session with the next scripted response.
pub(crate) struct MockGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Option<Duration>,
}

impl MockGateway {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
        max_tokens: Option<u32>,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())));
        Ok(Box::new(MockSession {
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            max_tokens,
            response: Mutex::new(Some(response)),
            calls: Arc::clone(&self.calls),
            delay: self.delay,
        }))
    }
}

struct MockSession {
    model: Model,
    system_prompt: String,
    max_tokens: Option<u32>,
    response: Mutex<Option<Result<String, GatewayError>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Option<Duration>,
}

#[async_trait]
impl LlmSession for MockSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: self.system_prompt.clone(),
            prompt: content.to_string(),
            max_tokens: self.max_tokens,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(GatewayError::Other("Session already used".to_string())))
    }
}

/// Search stub keyed by query. Unknown queries return no hits.
#[derive(Default)]
pub(crate) struct MockSearch {
    results: HashMap<String, Result<Vec<SearchHit>, String>>,
    delays: HashMap<String, Duration>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, query: &str, urls: &[&str]) -> Self {
        let hits = urls
            .iter()
            .map(|url| SearchHit::new(format!("Title of {url}"), *url, format!("About {url}")))
            .collect();
        self.results.insert(query.to_string(), Ok(hits));
        self
    }

    pub fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.results
            .insert(query.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchGateway for MockSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        match self.results.get(query) {
            Some(Ok(hits)) => Ok(hits.clone()),
            Some(Err(message)) => Err(SearchError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// Records progress events as strings like `start:split:1`.
#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start:{}:{}", phase.as_str(), total_tasks));
    }

    fn on_task_complete(&self, phase: &Phase, label: &str, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("task:{}:{}:{}", phase.as_str(), label, success));
    }

    fn on_phase_complete(&self, phase: &Phase, _summary: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("complete:{}", phase.as_str()));
    }
}

/// In-memory history
#[derive(Default)]
pub(crate) struct MemoryHistory {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistory {
    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ResearchHistory for MemoryHistory {
    fn record(&self, record: HistoryRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
