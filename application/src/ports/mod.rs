//! Port definitions (interfaces for external systems)
//!
//! Ports define the contracts that adapters in the infrastructure layer
//! must implement.

pub mod llm_gateway;
pub mod progress;
pub mod research_history;
pub mod search_gateway;
