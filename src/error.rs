//! Error types for the aggregator.
//!
//! None of these ever leave [`SearchAggregator::search`](crate::engine::SearchAggregator::search);
//! they are visible through `try_search` and the construction APIs.

/// Errors that can occur while configuring or running a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
  /// The backing data store of a source failed.
  #[error("store error: {0}")]
  Store(String),

  /// The source filter names a source that is not configured.
  #[error("unknown source: {0}")]
  UnknownSource(String),

  /// Invalid aggregator or registry configuration.
  #[error("config error: {0}")]
  Config(String),
}

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_store() {
    let err = SearchError::Store("connection refused".into());
    assert_eq!(err.to_string(), "store error: connection refused");
  }

  #[test]
  fn display_unknown_source() {
    let err = SearchError::UnknownSource("videos".into());
    assert_eq!(err.to_string(), "unknown source: videos");
  }

  #[test]
  fn display_config() {
    let err = SearchError::Config("per_source_limit must be greater than 0".into());
    assert_eq!(
      err.to_string(),
      "config error: per_source_limit must be greater than 0"
    );
  }

  #[test]
  fn error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SearchError>();
  }
}
