//! Result Set and domain filter

use std::collections::BTreeSet;

/// Case-insensitive substring match against the target domain.
///
/// The whole raw identifier is searched; no hostname parsing happens.
#[derive(Debug, Clone)]
pub struct DomainFilter {
    needle: String,
}

impl DomainFilter {
    pub fn new(domain: &str) -> Self {
        Self {
            needle: domain.to_lowercase(),
        }
    }

    pub fn matches(&self, id: &str) -> bool {
        id.to_lowercase().contains(&self.needle)
    }
}

/// Deduplicated subdomain identifiers, iterated in lexicographic order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubdomainSet {
    inner: BTreeSet<String>,
}

impl SubdomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` exactly as returned. Returns true if it was not present.
    pub fn insert(&mut self, id: &str) -> bool {
        self.inner.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        self.inner.into_iter().collect()
    }
}
