//! The `Source` trait and the standard store-backed source.

use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::filter::FilterExpr;
use crate::presenter::{FieldPresenter, RecordPresenter};
use crate::store::{Lookup, RecordStore};
use crate::types::{Record, SearchResult};
use std::fmt;
use std::sync::Arc;

/// A named content collection that can be searched.
///
/// The [`SearchAggregator`](crate::engine::SearchAggregator) fans a query
/// out to every active `Source` and merges what they return. Implementations
/// decide how matching works; [`SearchableSource`] is the standard one.
///
/// The `Send` and `Sync` bounds are required to allow sources to be queried
/// concurrently by the aggregator.
pub trait Source: Send + Sync {
  /// Returns the key identifying this source, e.g. `"articles"`.
  ///
  /// The key is what callers pass as the source filter and what appears as
  /// the `type` of every result the source produces.
  fn key(&self) -> &str;

  /// Finds the records matching `needle` and presents them as results.
  ///
  /// # Arguments
  ///
  /// * `needle` - The sanitized, non-empty query text.
  /// * `config` - Limits to honour: at most `config.per_source_limit`
  ///   results, excerpts of at most `config.excerpt_length` characters.
  ///
  /// # Returns
  ///
  /// The matches, newest first.
  ///
  /// # Errors
  ///
  /// Returns an error if the backing collection cannot be read.
  fn lookup(&self, needle: &str, config: &AggregatorConfig) -> Result<Vec<SearchResult>>;
}

/// A source backed by a [`RecordStore`].
///
/// A record matches when any of the `match_fields` contains the query text
/// (case-insensitively) and the record passes the optional `constraint`.
///
/// # Examples
///
/// ```rust
/// use multisearch::prelude::*;
/// use std::sync::Arc;
///
/// let articles = SearchableSource::new("articles", Arc::new(InMemStore::new()))
///   .match_fields(["title", "excerpt", "content"])
///   .constraint(FilterExpr::equals("status", "published"))
///   .presenter(FieldPresenter::new().url_builder(UrlBuilder::prefix("/articles")));
///
/// assert_eq!(articles.key(), "articles");
/// ```
pub struct SearchableSource {
  key: String,
  match_fields: Vec<String>,
  constraint: Option<FilterExpr>,
  presenter: Arc<dyn RecordPresenter>,
  store: Arc<dyn RecordStore>,
}

impl SearchableSource {
  /// Creates a source over `store` that matches on `title` and presents
  /// records with a default [`FieldPresenter`].
  pub fn new(key: impl Into<String>, store: Arc<dyn RecordStore>) -> Self {
    Self {
      key: key.into(),
      match_fields: vec!["title".to_string()],
      constraint: None,
      presenter: Arc::new(FieldPresenter::new()),
      store,
    }
  }

  /// Sets the attributes checked for the query text, in order.
  pub fn match_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.match_fields = fields.into_iter().map(Into::into).collect();
    self
  }

  /// Sets a fixed predicate every eligible record must satisfy.
  pub fn constraint(mut self, constraint: FilterExpr) -> Self {
    self.constraint = Some(constraint);
    self
  }

  /// Sets how records are turned into results.
  pub fn presenter(mut self, presenter: impl RecordPresenter + 'static) -> Self {
    self.presenter = Arc::new(presenter);
    self
  }

  /// The attributes checked for the query text.
  pub fn fields(&self) -> &[String] {
    &self.match_fields
  }

  /// Builds the where-clause for `needle`.
  pub fn filter_for(&self, needle: &str) -> FilterExpr {
    let matches = FilterExpr::any_contains(&self.match_fields, needle);
    match &self.constraint {
      Some(constraint) => matches.and(constraint.clone()),
      None => matches,
    }
  }

  fn present(&self, record: &Record, config: &AggregatorConfig) -> SearchResult {
    SearchResult {
      id: record.id,
      title: self.presenter.title(record),
      source_key: self.key.clone(),
      url: self.presenter.url(record),
      excerpt: self.presenter.excerpt(record, config.excerpt_length),
      created_at: record.created_at,
    }
  }
}

impl Source for SearchableSource {
  fn key(&self) -> &str {
    &self.key
  }

  fn lookup(&self, needle: &str, config: &AggregatorConfig) -> Result<Vec<SearchResult>> {
    let lookup = Lookup::new(self.filter_for(needle), config.per_source_limit);
    let records = self.store.select(&lookup)?;

    Ok(
      records
        .iter()
        .map(|record| self.present(record, config))
        .collect(),
    )
  }
}

impl fmt::Debug for SearchableSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SearchableSource")
      .field("key", &self.key)
      .field("match_fields", &self.match_fields)
      .field("constraint", &self.constraint)
      .finish_non_exhaustive()
  }
}
