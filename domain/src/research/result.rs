//! Result of a complete research run

use super::draft::Draft;
use super::reflection::ReflectionResult;
use super::source::SourceSet;
use serde::{Deserialize, Serialize};

/// Counters reported alongside the sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchStats {
    pub queries_executed: usize,
    pub sources_collected: usize,
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    pub queries: Vec<String>,
    pub sources: SourceSet,
    pub draft: Draft,
    pub reflection: ReflectionResult,
    pub stats: ResearchStats,
}

impl ResearchResult {
    /// The text to hand to the reader.
    pub fn final_text(&self) -> &str {
        &self.reflection.final_text
    }
}
