//! Aggregator configuration with sensible defaults.
//!
//! [`AggregatorConfig`] controls how many results each source may contribute
//! and how long excerpts get. It deserializes from a config section where
//! every field is optional.

use crate::error::{Result, SearchError};
use crate::text::DEFAULT_EXCERPT_LENGTH;
use serde::{Deserialize, Serialize};

/// Configuration for a [`SearchAggregator`](crate::engine::SearchAggregator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
  /// Maximum number of results a single source contributes to a search.
  #[serde(default = "default_per_source_limit")]
  pub per_source_limit: usize,
  /// Maximum length, in characters, of an excerpt derived from markup.
  #[serde(default = "default_excerpt_length")]
  pub excerpt_length: usize,
}

fn default_per_source_limit() -> usize {
  10
}

fn default_excerpt_length() -> usize {
  DEFAULT_EXCERPT_LENGTH
}

impl Default for AggregatorConfig {
  fn default() -> Self {
    Self {
      per_source_limit: default_per_source_limit(),
      excerpt_length: default_excerpt_length(),
    }
  }
}

impl AggregatorConfig {
  /// Parses a configuration from JSON and validates it.
  ///
  /// # Errors
  ///
  /// Returns [`SearchError::Config`] if the JSON is malformed or a value is
  /// out of range.
  pub fn from_json(json: &str) -> Result<Self> {
    let config: Self =
      serde_json::from_str(json).map_err(|err| SearchError::Config(err.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  /// Validates this configuration, returning an error if any field is invalid.
  ///
  /// Checks:
  /// - `per_source_limit` must be greater than 0
  /// - `excerpt_length` must be greater than 0
  pub fn validate(&self) -> Result<()> {
    if self.per_source_limit == 0 {
      return Err(SearchError::Config(
        "per_source_limit must be greater than 0".into(),
      ));
    }
    if self.excerpt_length == 0 {
      return Err(SearchError::Config(
        "excerpt_length must be greater than 0".into(),
      ));
    }
    Ok(())
  }
}
