//! Source value objects.
//!
//! A [`SearchHit`] is what the search API hands back; a [`Source`] is a hit
//! that made it into the run's [`SourceSet`], tagged with the query that
//! found it.

use super::normalize::normalize_url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single raw search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// A search result used as citation evidence (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub title: String,
    pub snippet: String,
    /// The query whose results first contained this source
    pub origin_query: String,
}

impl Source {
    pub fn from_hit(hit: SearchHit, origin_query: impl Into<String>) -> Self {
        Self {
            url: hit.url.trim().to_string(),
            title: hit.title,
            snippet: hit.snippet,
            origin_query: origin_query.into(),
        }
    }

    /// Identity of this source (see [`normalize_url`]).
    pub fn key(&self) -> String {
        normalize_url(&self.url)
    }
}

/// Ordered, deduplicated collection of sources for one research run.
///
/// Insertion order is first-seen order; a source whose normalized url is
/// already present is rejected. Sources are numbered from 1 in prompts and
/// citation markers (`[Source 1]` is `get(0)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Source>", into = "Vec<Source>")]
pub struct SourceSet {
    sources: Vec<Source>,
    positions: HashMap<String, usize>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a source unless its url is empty or already present.
    ///
    /// Returns `true` if the source was added.
    pub fn insert(&mut self, source: Source) -> bool {
        if source.url.is_empty() {
            return false;
        }
        let key = source.key();
        if self.positions.contains_key(&key) {
            return false;
        }
        self.positions.insert(key, self.sources.len());
        self.sources.push(source);
        true
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }

    pub fn as_slice(&self) -> &[Source] {
        &self.sources
    }

    /// Look up a source by its 1-based citation number.
    pub fn by_number(&self, number: usize) -> Option<&Source> {
        number.checked_sub(1).and_then(|i| self.sources.get(i))
    }

    /// Look up a source by url (compared in normalized form).
    pub fn find(&self, url: &str) -> Option<&Source> {
        self.positions
            .get(&normalize_url(url))
            .map(|&i| &self.sources[i])
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.positions.contains_key(&normalize_url(url))
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.url.as_str())
    }
}

impl From<Vec<Source>> for SourceSet {
    fn from(sources: Vec<Source>) -> Self {
        sources.into_iter().collect()
    }
}

impl From<SourceSet> for Vec<Source> {
    fn from(set: SourceSet) -> Self {
        set.sources
    }
}

impl FromIterator<Source> for SourceSet {
    fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self {
        let mut set = SourceSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Source> for SourceSet {
    fn extend<I: IntoIterator<Item = Source>>(&mut self, iter: I) {
        for source in iter {
            self.insert(source);
        }
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}
