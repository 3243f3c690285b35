//! Domain layer for scribe
//!
//! This crate contains the core research concepts, value objects, prompts
//! and parsers. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Sources and citations
//!
//! - **Source**: a search result used as citation evidence, identified by its
//!   normalized url
//! - **SourceSet**: the deduplicated, first-seen-ordered sources of one run
//! - **Citation marker**: `[Source N]` or `[https://...]` inside generated text
//!
//! ## Draft and reflection
//!
//! - **Draft**: generated text that should cite only SourceSet entries
//! - **Reflection**: the validation pass; its output is always filtered by a
//!   deterministic citation-integrity check

pub mod config;
pub mod core;
pub mod prompt;
pub mod research;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model, request::ResearchRequest};
pub use prompt::PromptTemplate;
pub use research::{
    citation::{CitationMarker, CitationRef, extract_citations, find_urls, unresolved_urls},
    draft::Draft,
    normalize::normalize_url,
    parsing::{ReflectionResponse, parse_query_list, parse_reflection_response},
    phase::Phase,
    reflection::{IntegrityReport, ReflectionResult, enforce_citation_integrity},
    result::{ResearchResult, ResearchStats},
    source::{SearchHit, Source, SourceSet},
};
