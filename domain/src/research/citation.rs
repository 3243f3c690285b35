//! Inline citation markers.
//!
//! A marker is a bracketed group of one or more references, separated by
//! commas or semicolons:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `[Source 3]` | the 3rd source of the run's [`SourceSet`] (1-based) |
//! | `[https://x.com/a]` | the source with that url |
//! | `[Source 1, Source 4]` | several references in one marker |
//!
//! Brackets whose content is not entirely made of references (markdown link
//! text, checkboxes, ...) are not markers. Urls outside markers (markdown
//! links, parentheses, mixed brackets) are found by [`find_urls`].

use super::source::{Source, SourceSet};
use regex::Regex;
use std::sync::LazyLock;

static BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]\n]+)\]").expect("bracket pattern is valid"));

static SOURCE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^source\s*#?\s*(\d+)$").expect("source reference pattern is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s<>\[\]{}"'`]+"#).expect("url pattern is valid")
});

/// One reference inside a marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationRef {
    /// `Source N`, 1-based
    Number(usize),
    /// A literal http(s) url
    Url(String),
}

impl CitationRef {
    fn parse(part: &str) -> Option<Self> {
        let part = part.trim();
        if let Some(caps) = SOURCE_REF_RE.captures(part) {
            return caps[1].parse().ok().map(CitationRef::Number);
        }
        let lower = part.to_ascii_lowercase();
        if (lower.starts_with("http://") || lower.starts_with("https://"))
            && !part.contains(char::is_whitespace)
        {
            return Some(CitationRef::Url(part.to_string()));
        }
        None
    }

    /// Resolve against the run's sources.
    pub fn resolve<'a>(&self, sources: &'a SourceSet) -> Option<&'a Source> {
        match self {
            CitationRef::Number(n) => sources.by_number(*n),
            CitationRef::Url(url) => sources.find(url),
        }
    }
}

impl std::fmt::Display for CitationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CitationRef::Number(n) => write!(f, "Source {}", n),
            CitationRef::Url(url) => write!(f, "{}", url),
        }
    }
}

/// A citation marker found in a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationMarker {
    /// Byte range of the whole marker, brackets included
    pub span: std::ops::Range<usize>,
    pub refs: Vec<CitationRef>,
}

impl CitationMarker {
    /// `true` when every reference in the marker resolves.
    pub fn is_resolved(&self, sources: &SourceSet) -> bool {
        self.refs.iter().all(|r| r.resolve(sources).is_some())
    }

    /// References that do not resolve against `sources`.
    pub fn broken_refs<'a>(&'a self, sources: &SourceSet) -> Vec<&'a CitationRef> {
        self.refs
            .iter()
            .filter(|r| r.resolve(sources).is_none())
            .collect()
    }
}

/// Find every citation marker in `text`, in order of appearance.
pub fn extract_citations(text: &str) -> Vec<CitationMarker> {
    BRACKET_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let refs: Option<Vec<CitationRef>> = caps[1]
                .split([',', ';'])
                .filter(|p| !p.trim().is_empty())
                .map(CitationRef::parse)
                .collect();
            let refs = refs.filter(|r| !r.is_empty())?;
            Some(CitationMarker {
                span: whole.range(),
                refs,
            })
        })
        .collect()
}

/// Every http(s) url in `text`, wherever it appears, in order.
///
/// Trailing sentence punctuation and unbalanced closing parentheses are not
/// part of the url (`(see https://x.com/a).` yields `https://x.com/a`).
pub fn find_urls(text: &str) -> Vec<&str> {
    URL_RE
        .find_iter(text)
        .map(|m| trim_url(m.as_str()))
        .filter(|url| url.contains("://") && !url.ends_with("://"))
        .collect()
}

fn trim_url(mut url: &str) -> &str {
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?', '*', '_']);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(inner) if inner.matches('(').count() < inner.matches(')').count() + 1 => inner,
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

/// Urls anywhere in `text` that are not among `sources`, unique, in order.
pub fn unresolved_urls<'a>(text: &'a str, sources: &SourceSet) -> Vec<&'a str> {
    let mut unresolved: Vec<&str> = Vec::new();
    for url in find_urls(text) {
        if !sources.contains_url(url) && !unresolved.contains(&url) {
            unresolved.push(url);
        }
    }
    unresolved
}

/// Urls of the sources cited in `text`, unique, in first-cited order.
///
/// Only resolved references contribute; the source's stored url is returned
/// regardless of how the citation spelled it.
pub fn cited_source_urls(text: &str, sources: &SourceSet) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for marker in extract_citations(text) {
        for source in marker.refs.iter().filter_map(|r| r.resolve(sources)) {
            if !urls.contains(&source.url) {
                urls.push(source.url.clone());
            }
        }
    }
    urls
}

/// References in `text` that do not resolve, rendered as written, followed
/// by unknown urls found outside markers.
pub fn broken_citations(text: &str, sources: &SourceSet) -> Vec<String> {
    let mut broken: Vec<String> = Vec::new();
    for marker in extract_citations(text) {
        for r in marker.broken_refs(sources) {
            let rendered = r.to_string();
            if !broken.contains(&rendered) {
                broken.push(rendered);
            }
        }
    }
    for url in unresolved_urls(text, sources) {
        if !broken.iter().any(|b| b == url) {
            broken.push(url.to_string());
        }
    }
    broken
}
