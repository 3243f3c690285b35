//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: LLM models the pipeline can run against
//! - [`request::ResearchRequest`]: a validated topic (plus optional requirements)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod request;
pub mod string;
