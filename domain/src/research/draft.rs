//! Draft value object

use super::citation::{broken_citations, cited_source_urls};
use super::source::SourceSet;
use serde::{Deserialize, Serialize};

/// The first generated version of the research document.
///
/// Built once from the writer's output and never modified; reflection
/// produces a new [`ReflectionResult`](super::reflection::ReflectionResult).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub text: String,
    /// Urls of the sources the draft cites, in first-cited order
    pub cited_source_urls: Vec<String>,
    /// Citations that did not resolve against the run's sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broken_citations: Vec<String>,
}

impl Draft {
    /// Build a draft from generated text, resolving its citations.
    pub fn from_text(text: impl Into<String>, sources: &SourceSet) -> Self {
        let text = text.into().trim().to_string();
        Self {
            cited_source_urls: cited_source_urls(&text, sources),
            broken_citations: broken_citations(&text, sources),
            text,
        }
    }

    pub fn has_broken_citations(&self) -> bool {
        !self.broken_citations.is_empty()
    }
}
