//! The ordered set of sources an aggregator searches.

use crate::error::{Result, SearchError};
use crate::source::Source;
use crate::types::ALL_SOURCES;
use std::collections::HashSet;
use std::fmt;

/// Registry of searchable sources, keyed by source key.
///
/// Registration order matters: it is the order sources are queried in, and
/// it decides the relative order of results with equal timestamps.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Box<dyn Source>>,
}

impl SourceRegistry {
    /// Create a new registry builder.
    pub fn builder() -> SourceRegistryBuilder {
        SourceRegistryBuilder::default()
    }

    /// Look up a source by key.
    pub fn get(&self, key: &str) -> Option<&dyn Source> {
        self.sources
            .iter()
            .find(|source| source.key() == key)
            .map(|source| source.as_ref())
    }

    /// Source keys in registration order.
    pub fn keys(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.key()).collect()
    }

    /// Iterate over the sources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Source> {
        self.sources.iter().map(|source| source.as_ref())
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

/// Builder for a source registry.
#[derive(Default)]
pub struct SourceRegistryBuilder {
    sources: Vec<Box<dyn Source>>,
}

impl SourceRegistryBuilder {
    /// Add a source.
    pub fn source(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Add an already boxed source.
    pub fn boxed(mut self, source: Box<dyn Source>) -> Self {
        self.sources.push(source);
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if a key is empty, reserved (`"all"`)
    /// or registered twice.
    pub fn build(self) -> Result<SourceRegistry> {
        let mut seen = HashSet::new();

        for source in &self.sources {
            let key = source.key();
            if key.is_empty() {
                return Err(SearchError::Config("source key must not be empty".into()));
            }
            if key == ALL_SOURCES {
                return Err(SearchError::Config(format!(
                    "source key \"{ALL_SOURCES}\" is reserved"
                )));
            }
            if !seen.insert(key) {
                return Err(SearchError::Config(format!(
                    "duplicate source key: {key}"
                )));
            }
        }

        Ok(SourceRegistry {
            sources: self.sources,
        })
    }
}
