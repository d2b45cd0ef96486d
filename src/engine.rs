//! The aggregator that fans a query out over every configured source.

use crate::config::AggregatorConfig;
use crate::error::{Result, SearchError};
use crate::registry::{SourceRegistry, SourceRegistryBuilder};
use crate::source::Source;
use crate::types::{SearchRequest, SearchResponse, SearchResult, SourceFilter};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Remove `%` wildcards and surrounding whitespace from user input.
///
/// Stores match with `%needle%`-style patterns, so a stray `%` would widen
/// the match. `"bit%coin"` searches for `"bitcoin"`.
///
/// Leading and trailing whitespace is not part of the needle: `" bitcoin "`
/// matches exactly what `"bitcoin"` matches. Inner whitespace is kept.
pub fn sanitize_query(query: &str) -> String {
  query.replace('%', "").trim().to_owned()
}

/// Keyword search across several content collections.
///
/// `SearchAggregator` owns a [`SourceRegistry`] and an [`AggregatorConfig`].
/// A search sanitizes the query, asks every active source for its newest
/// matches (at most `per_source_limit` each), concatenates the lists and
/// sorts them newest first. The sort is stable, so results with equal
/// timestamps stay in source registration order.
///
/// [`search`](Self::search) never fails: unknown source filters, empty
/// queries and store failures all yield an empty list. Use
/// [`try_search`](Self::try_search) to see why a search came back empty.
///
/// Create a `SearchAggregator` using the [`SearchAggregatorBuilder`].
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use multisearch::prelude::*;
/// use std::sync::Arc;
///
/// let store = Arc::new(InMemStore::new());
/// store.put(
///   Record::new(1, Utc::now())
///     .with("title", "Bitcoin ETF Approved")
///     .with("slug", "bitcoin-etf-approved"),
/// );
///
/// let aggregator = SearchAggregator::builder()
///   .source(
///     SearchableSource::new("articles", store)
///       .presenter(FieldPresenter::new().url_builder(UrlBuilder::prefix("/articles"))),
///   )
///   .build()
///   .unwrap();
///
/// let results = aggregator.search("bitcoin", "all");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].url, "/articles/bitcoin-etf-approved");
/// ```
#[derive(Debug)]
pub struct SearchAggregator {
  /// The sources, in fan-out order.
  registry: SourceRegistry,
  /// Per-source limit and excerpt length.
  config: AggregatorConfig,
}

impl SearchAggregator {
  /// Creates a new `SearchAggregatorBuilder` to construct an aggregator.
  pub fn builder() -> SearchAggregatorBuilder {
    SearchAggregatorBuilder::new()
  }

  /// Creates an aggregator from a prepared registry.
  ///
  /// # Errors
  ///
  /// Returns [`SearchError::Config`] if `config` is invalid.
  pub fn new(registry: SourceRegistry, config: AggregatorConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { registry, config })
  }

  /// The configured sources.
  pub fn registry(&self) -> &SourceRegistry {
    &self.registry
  }

  /// The active configuration.
  pub fn config(&self) -> &AggregatorConfig {
    &self.config
  }

  /// Source keys in fan-out order, e.g. for rendering filter tabs.
  pub fn source_keys(&self) -> Vec<&str> {
    self.registry.keys()
  }

  /// Searches every source. Same as `search(query, "all")`.
  pub fn search_all(&self, query: &str) -> Vec<SearchResult> {
    self.search(query, crate::types::ALL_SOURCES)
  }

  /// Searches the sources selected by `filter` for `query`.
  ///
  /// `filter` is either `"all"` or a source key. This never fails: anything
  /// that would make [`try_search`](Self::try_search) return an error is
  /// logged and turned into an empty list.
  ///
  /// # Arguments
  ///
  /// * `query` - Free text typed by the user.
  /// * `filter` - `"all"` or the key of one source.
  ///
  /// # Returns
  ///
  /// The matches, newest first, at most `per_source_limit` per source.
  pub fn search(&self, query: &str, filter: &str) -> Vec<SearchResult> {
    match self.try_search(query, filter) {
      Ok(results) => results,
      Err(err @ SearchError::UnknownSource(_)) => {
        tracing::debug!(filter, error = %err, "unknown source filter, returning no results");
        Vec::new()
      }
      Err(err) => {
        tracing::warn!(query, filter, error = %err, "search failed, returning no results");
        Vec::new()
      }
    }
  }

  /// Searches like [`search`](Self::search), but reports failures.
  ///
  /// An empty or whitespace-only query (after `%` removal) is not an error
  /// and yields `Ok(vec![])`.
  ///
  /// # Errors
  ///
  /// - [`SearchError::UnknownSource`] if `filter` is neither `"all"` nor a
  ///   configured key.
  /// - Whatever a source returns if its lookup fails. One failing source
  ///   fails the whole search.
  pub fn try_search(&self, query: &str, filter: &str) -> Result<Vec<SearchResult>> {
    if query.trim().is_empty() {
      return Ok(Vec::new());
    }

    let needle = sanitize_query(query);
    if needle.is_empty() {
      return Ok(Vec::new());
    }

    let filter = SourceFilter::parse(filter);
    let active: Vec<&dyn Source> = match &filter {
      SourceFilter::All => self.registry.iter().collect(),
      SourceFilter::Only(key) => {
        let source = self
          .registry
          .get(key)
          .ok_or_else(|| SearchError::UnknownSource(key.clone()))?;
        vec![source]
      }
    };

    tracing::debug!(query = %needle, %filter, sources = active.len(), "searching");

    let per_source = self.fan_out(&active, &needle)?;

    let mut results: Vec<SearchResult> = per_source.into_iter().flatten().collect();

    // Stable: ties keep source order, then per-source order
    results.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    tracing::debug!(query = %needle, count = results.len(), "search complete");
    for result in &results {
      tracing::trace!(
        id = result.id,
        source = %result.source_key,
        title = %result.title,
        "search result"
      );
    }

    Ok(results)
  }

  /// Answers a boundary request with the response envelope.
  ///
  /// Like [`search`](Self::search), this never fails.
  pub fn handle(&self, request: &SearchRequest) -> SearchResponse {
    let results = self.search(&request.query, &request.source_type);

    SearchResponse {
      query: request.query.trim().to_owned(),
      source_type: request.source_type.clone(),
      total: results.len(),
      results,
    }
  }

  /// Queries each active source, keeping source order.
  fn fan_out(&self, active: &[&dyn Source], needle: &str) -> Result<Vec<Vec<SearchResult>>> {
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<Vec<SearchResult>>> = active
      .par_iter()
      .map(|source| self.lookup(*source, needle))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<Vec<SearchResult>>> = active
      .iter()
      .map(|source| self.lookup(*source, needle))
      .collect();

    outcomes.into_iter().collect()
  }

  /// Queries one source and enforces the per-source limit.
  fn lookup(&self, source: &dyn Source, needle: &str) -> Result<Vec<SearchResult>> {
    match source.lookup(needle, &self.config) {
      Ok(mut results) => {
        results.truncate(self.config.per_source_limit);
        tracing::debug!(source = source.key(), count = results.len(), "source returned results");
        Ok(results)
      }
      Err(err) => {
        tracing::warn!(source = source.key(), error = %err, "source lookup failed");
        Err(err)
      }
    }
  }
}

/// A builder for creating `SearchAggregator` instances.
///
/// # Examples
///
/// ```
/// use multisearch::prelude::*;
/// use std::sync::Arc;
///
/// let aggregator = SearchAggregator::builder()
///   .source(SearchableSource::new("events", Arc::new(InMemStore::new())))
///   .source(SearchableSource::new("presales", Arc::new(InMemStore::new())))
///   .config(AggregatorConfig { per_source_limit: 5, ..Default::default() })
///   .build()
///   .unwrap();
///
/// assert_eq!(aggregator.source_keys(), vec!["events", "presales"]);
/// ```
#[derive(Default)]
pub struct SearchAggregatorBuilder {
  registry: SourceRegistryBuilder,
  config: AggregatorConfig,
}

impl SearchAggregatorBuilder {
  /// Creates a new builder with no sources and the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a source. Sources are queried in the order they are added.
  pub fn source(mut self, source: impl Source + 'static) -> Self {
    self.registry = self.registry.source(source);
    self
  }

  /// Adds several sources, in order.
  pub fn sources<I, S>(mut self, sources: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Source + 'static,
  {
    for source in sources {
      self.registry = self.registry.source(source);
    }
    self
  }

  /// Adds an already boxed source.
  pub fn boxed(mut self, source: Box<dyn Source>) -> Self {
    self.registry = self.registry.boxed(source);
    self
  }

  /// Sets the configuration.
  pub fn config(mut self, config: AggregatorConfig) -> Self {
    self.config = config;
    self
  }

  /// Builds the `SearchAggregator`.
  ///
  /// # Errors
  ///
  /// Returns [`SearchError::Config`] if the configuration is invalid or the
  /// source keys clash.
  pub fn build(self) -> Result<SearchAggregator> {
    SearchAggregator::new(self.registry.build()?, self.config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sanitize_strips_wildcards_and_whitespace() {
    assert_eq!(sanitize_query("bit%coin"), "bitcoin");
    assert_eq!(sanitize_query("  %eth%  "), "eth");
    assert_eq!(sanitize_query("%%%"), "");
    assert_eq!(sanitize_query("solana"), "solana");
    assert_eq!(sanitize_query(" bitcoin "), "bitcoin");
    assert_eq!(sanitize_query(" bit coin "), "bit coin");
  }

  #[test]
  fn invalid_config_rejected_at_build() {
    let err = SearchAggregator::builder()
      .config(AggregatorConfig {
        per_source_limit: 0,
        ..Default::default()
      })
      .build()
      .unwrap_err();
    assert!(matches!(err, SearchError::Config(_)));
  }

  #[test]
  fn empty_registry_returns_nothing() {
    let aggregator = SearchAggregator::builder().build().unwrap();
    assert!(aggregator.search_all("bitcoin").is_empty());
    assert!(aggregator.try_search("bitcoin", "all").unwrap().is_empty());
  }

  #[test]
  fn unknown_filter_is_reported_by_try_search() {
    let aggregator = SearchAggregator::builder().build().unwrap();
    let err = aggregator.try_search("bitcoin", "videos").unwrap_err();
    assert!(matches!(err, SearchError::UnknownSource(key) if key == "videos"));
    assert!(aggregator.search("bitcoin", "videos").is_empty());
  }

  #[test]
  fn blank_query_short_circuits_before_filter_lookup() {
    let aggregator = SearchAggregator::builder().build().unwrap();
    assert!(aggregator.try_search("   ", "videos").unwrap().is_empty());
    assert!(aggregator.try_search("%", "videos").unwrap().is_empty());
  }
}
