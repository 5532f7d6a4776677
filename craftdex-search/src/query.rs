//! Free-text query normalization and identity hashing.

use serde::Serialize;

#[derive(Serialize)]
struct HashEnvelope<'a> {
    keywords: &'a [String],
}

/// A normalized free-text search query.
///
/// Keywords are the space-separated tokens of the raw string, trimmed,
/// lowercased, at least two characters long, and sorted ascending. Duplicate
/// keywords are kept: sorting canonicalizes order for the hash, it does not
/// deduplicate. Two queries with the same keyword multiset share a hash,
/// which is exactly what the cache key wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    keywords: Vec<String>,
    hash: u32,
}

impl SearchQuery {
    /// Parses and normalizes a raw query string.
    ///
    /// The hash is the CRC32 of the canonical JSON encoding of the sorted
    /// keyword list, so it is stable across processes and restarts.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut keywords: Vec<String> = raw
            .split(' ')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| token.chars().count() >= 2)
            .collect();
        keywords.sort();

        let envelope = HashEnvelope {
            keywords: &keywords,
        };
        // Serializing a list of strings cannot fail.
        let encoded = serde_json::to_vec(&envelope).unwrap_or_default();
        let hash = crc32fast::hash(&encoded);

        Self {
            raw: raw.to_string(),
            keywords,
            hash,
        }
    }

    /// The raw query string as received.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized, sorted keywords.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Stable identity hash of the normalized query.
    #[must_use]
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// True when normalization left no usable keywords. An empty query is
    /// valid and yields empty results, never an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
