//! Reflection result and the deterministic citation-integrity pass.
//!
//! The reflection model is asked to drop unsupported sentences, but its
//! judgment is advisory. Whatever it returns, [`enforce_citation_integrity`]
//! then removes every sentence that cites something outside the run's
//! [`SourceSet`], so an unknown url can never survive into the final text.

use super::citation::{extract_citations, unresolved_urls};
use super::parsing::ReflectionResponse;
use super::source::SourceSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validated successor of a [`Draft`](super::draft::Draft)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionResult {
    pub final_text: String,
    /// Sentences removed, by the model first and then by the integrity pass
    pub removed_claims: Vec<String>,
    /// Number of resolved citations per source url in the final text
    pub source_usage: BTreeMap<String, usize>,
    pub changes_summary: String,
    /// Sentences the integrity pass had to strip (a subset of `removed_claims`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integrity_defects: Vec<String>,
}

impl ReflectionResult {
    /// Apply the integrity pass to a parsed reflection reply.
    pub fn from_response(response: ReflectionResponse, sources: &SourceSet) -> Self {
        let integrity = enforce_citation_integrity(&response.final_text, sources);

        let mut removed_claims = response.removed_claims;
        for sentence in &integrity.removed {
            if !removed_claims.contains(sentence) {
                removed_claims.push(sentence.clone());
            }
        }

        Self {
            source_usage: source_usage(&integrity.text, sources),
            final_text: integrity.text,
            removed_claims,
            changes_summary: response
                .changes_summary
                .unwrap_or_else(|| "No changes summary provided.".to_string()),
            integrity_defects: integrity.removed,
        }
    }

    pub fn has_integrity_defects(&self) -> bool {
        !self.integrity_defects.is_empty()
    }
}

/// Text after the integrity pass, plus what was cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    pub text: String,
    pub removed: Vec<String>,
}

/// Remove every sentence containing a citation that does not resolve, or a
/// url anywhere in it (markdown link, parentheses, mixed bracket) that is not
/// one of `sources`.
///
/// Sentences are split by [`split_sentences`]; kept sentences are
/// reassembled verbatim, so untouched text is byte-for-byte preserved.
pub fn enforce_citation_integrity(text: &str, sources: &SourceSet) -> IntegrityReport {
    let mut kept = String::with_capacity(text.len());
    let mut removed = Vec::new();

    for sentence in split_sentences(text) {
        let broken = extract_citations(sentence)
            .iter()
            .any(|marker| !marker.is_resolved(sources))
            || !unresolved_urls(sentence, sources).is_empty();
        if broken {
            let claim = sentence.trim();
            if !claim.is_empty() {
                removed.push(claim.to_string());
            }
            // keep the line break so following lines do not merge
            if sentence.ends_with('\n') {
                kept.push('\n');
            }
        } else {
            kept.push_str(sentence);
        }
    }

    IntegrityReport {
        text: collapse_blank_runs(kept.trim()),
        removed,
    }
}

/// Count resolved citations per source url.
pub fn source_usage(text: &str, sources: &SourceSet) -> BTreeMap<String, usize> {
    let mut usage = BTreeMap::new();
    for marker in extract_citations(text) {
        for source in marker.refs.iter().filter_map(|r| r.resolve(sources)) {
            *usage.entry(source.url.clone()).or_insert(0) += 1;
        }
    }
    usage
}

/// Split text into sentence segments that concatenate back to the input.
///
/// A segment ends after a line break, or after `.`, `!` or `?` followed by
/// spaces or tabs (the whitespace stays with the segment). Terminators
/// inside `[...]` do not split, so urls in citation markers stay whole.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '\n' => {
                segments.push(&text[start..idx + 1]);
                start = idx + 1;
                depth = 0;
            }
            '.' | '!' | '?' if depth == 0 => {
                if !matches!(chars.peek(), Some((_, ' ' | '\t'))) {
                    continue;
                }
                let mut end = idx + 1;
                while let Some(&(next_idx, next)) = chars.peek() {
                    if next != ' ' && next != '\t' {
                        break;
                    }
                    end = next_idx + next.len_utf8();
                    chars.next();
                }
                segments.push(&text[start..end]);
                start = end;
            }
            _ => {}
        }
    }

    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}

/// Collapse runs of three or more line breaks left behind by removals.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(c);
    }
    out
}
