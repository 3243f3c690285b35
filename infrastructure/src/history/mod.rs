//! Research history persistence
//!
//! Provides [`JsonlResearchHistory`], an append-only JSONL file that
//! implements the [`ResearchHistory`](scribe_application::ResearchHistory) port.

mod jsonl_history;

pub use jsonl_history::JsonlResearchHistory;
