//! Progress reporters for the research pipeline

pub mod reporter;
