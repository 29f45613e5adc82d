//! Static product-key → bulletin-page registry.
//!
//! Defined once at startup and immutable for the process lifetime.
//! Iteration order is the registration order, which also fixes the
//! merge order for all-sources aggregation.

use url::Url;

/// Published bulletin pages, keyed by product family.
const DEFAULT_SOURCES: &[(&str, &str)] = &[
    (
        "gke",
        "https://docs.cloud.google.com/kubernetes-engine/security-bulletins",
    ),
    (
        "compute",
        "https://docs.cloud.google.com/compute/docs/security-bulletins",
    ),
    (
        "sql",
        "https://docs.cloud.google.com/sql/docs/security-bulletins",
    ),
    (
        "mesh",
        "https://docs.cloud.google.com/service-mesh/docs/security-bulletins",
    ),
];

/// One registered upstream bulletin page.
#[derive(Debug, Clone)]
pub struct Source {
    pub key: String,
    pub location: Url,
}

impl Source {
    pub fn new(key: impl Into<String>, location: Url) -> Self {
        Self {
            key: key.into(),
            location,
        }
    }
}

/// Ordered, read-only table of registered sources.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    /// Registry over an explicit source table (tests point this at mocks).
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// Registry over the published Google Cloud bulletin pages.
    pub fn with_defaults() -> Self {
        let sources = DEFAULT_SOURCES
            .iter()
            .map(|(key, location)| {
                let url = Url::parse(location).expect("default source location is valid");
                Source::new(*key, url)
            })
            .collect();
        Self { sources }
    }

    /// Look up a source by product key.
    pub fn get(&self, key: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.key == key)
    }

    /// Sources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
