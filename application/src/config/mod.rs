//! Application-level configuration.
//!
//! - [`ResearchParams`]: limits and budgets that control a research run

pub mod research_params;

pub use research_params::ResearchParams;
