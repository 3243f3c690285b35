//! Pipeline phases

use serde::{Deserialize, Serialize};

/// Stage of a research run.
///
/// Runs move strictly forward: `Split → Aggregate → Draft → Reflect → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Decompose the request into focused search queries
    Split,
    /// Run the queries and collect deduplicated sources
    Aggregate,
    /// Write the cited draft
    Draft,
    /// Validate citations and strip unsupported claims
    Reflect,
    Done,
}

impl Phase {
    /// The working phases, in execution order.
    pub const PIPELINE: [Phase; 4] = [Phase::Split, Phase::Aggregate, Phase::Draft, Phase::Reflect];

    pub fn as_str(&self) -> &str {
        match self {
            Phase::Split => "split",
            Phase::Aggregate => "aggregate",
            Phase::Draft => "draft",
            Phase::Reflect => "reflect",
            Phase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Split => "Query Splitting",
            Phase::Aggregate => "Source Collection",
            Phase::Draft => "Draft Writing",
            Phase::Reflect => "Reflection",
            Phase::Done => "Done",
        }
    }

    /// 1-based position among the working phases (`None` for `Done`).
    pub fn step(&self) -> Option<usize> {
        Self::PIPELINE.iter().position(|p| p == self).map(|i| i + 1)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
