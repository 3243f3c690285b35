//! Port for research history.
//!
//! Every completed run is recorded as a [`HistoryRecord`]. The store is
//! append-only; reading back is limited to the most recent entries.
//!
//! Recording is synchronous and non-fallible so a broken history file never
//! fails a research run that already succeeded. Implementations log their
//! own write errors.

use chrono::{DateTime, Utc};
use scribe_domain::ResearchResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One completed research run, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub topic: String,
    #[serde(default)]
    pub requirements: Option<String>,
    pub draft: String,
    pub improved_draft: String,
    pub changes_summary: String,
    #[serde(default)]
    pub removed_claims: Vec<String>,
    pub sources_count: usize,
    pub queries_count: usize,
}

impl HistoryRecord {
    pub fn from_result(result: &ResearchResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("{}", created_at.format("%Y%m%dT%H%M%S%.3fZ")),
            created_at,
            topic: result.topic.clone(),
            requirements: result.requirements.clone(),
            draft: result.draft.text.clone(),
            improved_draft: result.reflection.final_text.clone(),
            changes_summary: result.reflection.changes_summary.clone(),
            removed_claims: result.reflection.removed_claims.clone(),
            sources_count: result.stats.sources_collected,
            queries_count: result.stats.queries_executed,
        }
    }
}

/// Errors reading the history back
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(String),
}

/// Port for persisting completed research runs.
pub trait ResearchHistory: Send + Sync {
    /// Record a completed run.
    fn record(&self, record: HistoryRecord);

    /// The `limit` most recent records, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError>;
}

/// No-op implementation for tests and when history is disabled.
pub struct NoHistory;

impl ResearchHistory for NoHistory {
    fn record(&self, _record: HistoryRecord) {}

    fn recent(&self, _limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        Ok(Vec::new())
    }
}
