//! Use cases
//!
//! Application-level operations that orchestrate domain logic. Each stage of
//! a research run is its own use case; [`run_research`] sequences them.

pub mod aggregate_sources;
pub mod reflect_draft;
pub mod run_research;
pub(crate) mod shared;
pub mod split_queries;
pub mod write_draft;

#[cfg(test)]
pub(crate) mod test_support;
