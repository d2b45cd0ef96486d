//! Per-source presentation of records as search results.
//!
//! Content collections name their columns differently: articles have a
//! `title` and an `excerpt`, airdrops a `name` and a `description`, events a
//! `title` and HTML `content`. Each source carries a [`RecordPresenter`] that
//! knows how to turn its records into the display fields of a
//! [`SearchResult`](crate::types::SearchResult).

use crate::text::excerpt_from;
use crate::types::Record;
use std::fmt;
use std::sync::Arc;

/// The link used when a result has no canonical URL.
pub const PLACEHOLDER_URL: &str = "#";

/// Maps a record's slug to its canonical path.
#[derive(Clone)]
pub struct UrlBuilder(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl UrlBuilder {
  /// Wraps an arbitrary slug-to-path function.
  pub fn new(build: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
    Self(Arc::new(build))
  }

  /// Builds `{prefix}/{slug}` paths, e.g. `/articles/bitcoin-etf-approved`.
  pub fn prefix(prefix: impl Into<String>) -> Self {
    let prefix = prefix.into();
    let prefix = prefix.trim_end_matches('/').to_owned();
    Self::new(move |slug| format!("{prefix}/{slug}"))
  }

  /// Builds the path for `slug`.
  pub fn build(&self, slug: &str) -> String {
    (self.0)(slug)
  }
}

impl fmt::Debug for UrlBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("UrlBuilder(..)")
  }
}

/// Turns a record into the display fields of a search result.
pub trait RecordPresenter: Send + Sync {
  /// The display title, or an empty string.
  fn title(&self, record: &Record) -> String;

  /// A plain-text summary of at most `limit` characters (plus an ellipsis),
  /// or an empty string.
  fn excerpt(&self, record: &Record, limit: usize) -> String;

  /// The canonical link, or [`PLACEHOLDER_URL`].
  fn url(&self, record: &Record) -> String;
}

/// A [`RecordPresenter`] driven by attribute names.
///
/// - the title is the first non-empty of `title_fields`;
/// - the excerpt is `excerpt_field` verbatim if non-empty, otherwise the
///   first non-empty of `fallback_fields` with markup stripped and the text
///   truncated;
/// - the URL is built from the `slug` attribute by the `url_builder`.
#[derive(Debug, Clone)]
pub struct FieldPresenter {
  title_fields: Vec<String>,
  excerpt_field: Option<String>,
  fallback_fields: Vec<String>,
  url_builder: Option<UrlBuilder>,
}

impl Default for FieldPresenter {
  fn default() -> Self {
    Self {
      title_fields: vec!["title".to_string(), "name".to_string()],
      excerpt_field: Some("excerpt".to_string()),
      fallback_fields: vec!["description".to_string(), "content".to_string()],
      url_builder: None,
    }
  }
}

impl FieldPresenter {
  /// Creates a presenter with the default field names and no URL builder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the title attributes, in priority order.
  pub fn title_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.title_fields = fields.into_iter().map(Into::into).collect();
    self
  }

  /// Sets the attribute used verbatim as the excerpt. `None` disables it.
  pub fn excerpt_field(mut self, field: Option<&str>) -> Self {
    self.excerpt_field = field.map(str::to_string);
    self
  }

  /// Sets the markup attributes an excerpt is derived from, in priority order.
  pub fn fallback_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.fallback_fields = fields.into_iter().map(Into::into).collect();
    self
  }

  /// Sets the URL builder.
  pub fn url_builder(mut self, builder: UrlBuilder) -> Self {
    self.url_builder = Some(builder);
    self
  }

  fn first_non_empty<'a>(
    record: &Record,
    fields: impl IntoIterator<Item = &'a String>,
  ) -> Option<String> {
    fields
      .into_iter()
      .filter_map(|field| record.text(field))
      .find(|text| !text.trim().is_empty())
  }
}

impl RecordPresenter for FieldPresenter {
  fn title(&self, record: &Record) -> String {
    Self::first_non_empty(record, &self.title_fields).unwrap_or_default()
  }

  fn excerpt(&self, record: &Record, limit: usize) -> String {
    if let Some(excerpt) = Self::first_non_empty(record, &self.excerpt_field) {
      return excerpt;
    }

    Self::first_non_empty(record, &self.fallback_fields)
      .map(|html| excerpt_from(&html, limit))
      .unwrap_or_default()
  }

  fn url(&self, record: &Record) -> String {
    match (&self.url_builder, record.slug()) {
      (Some(builder), Some(slug)) => builder.build(&slug),
      _ => PLACEHOLDER_URL.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  fn record() -> Record {
    Record::new(1, Utc::now())
  }

  #[test]
  fn title_falls_back_to_name() {
    let presenter = FieldPresenter::new();
    let airdrop = record().with("name", "Layer Zero Airdrop");
    assert_eq!(presenter.title(&airdrop), "Layer Zero Airdrop");

    let article = record().with("title", "ETF Week").with("name", "ignored");
    assert_eq!(presenter.title(&article), "ETF Week");

    assert_eq!(presenter.title(&record()), "");
  }

  #[test]
  fn explicit_excerpt_wins_and_is_used_verbatim() {
    let presenter = FieldPresenter::new();
    let article = record()
      .with("excerpt", "Hand-written <em>summary</em>")
      .with("description", "desc")
      .with("content", "body");
    assert_eq!(presenter.excerpt(&article, 150), "Hand-written <em>summary</em>");
  }

  #[test]
  fn description_beats_content() {
    let presenter = FieldPresenter::new();
    let event = record()
      .with("excerpt", "")
      .with("description", "<p>From the description</p>")
      .with("content", "<p>From the content</p>");
    assert_eq!(presenter.excerpt(&event, 150), "From the description");
  }

  #[test]
  fn content_is_last_resort() {
    let presenter = FieldPresenter::new();
    let long = format!("<div>{}</div>", "x".repeat(200));
    let presale = record().with("content", long);
    let excerpt = presenter.excerpt(&presale, 150);
    assert_eq!(excerpt, format!("{}...", "x".repeat(150)));

    assert_eq!(presenter.excerpt(&record(), 150), "");
  }

  #[test]
  fn url_uses_builder_and_slug() {
    let presenter = FieldPresenter::new().url_builder(UrlBuilder::prefix("/events/"));
    let event = record().with("slug", "eth-denver");
    assert_eq!(presenter.url(&event), "/events/eth-denver");
    assert_eq!(presenter.url(&record()), PLACEHOLDER_URL);
  }

  #[test]
  fn url_without_builder_is_placeholder() {
    let presenter = FieldPresenter::new();
    let tag = record().with("slug", "defi");
    assert_eq!(presenter.url(&tag), "#");
  }

  #[test]
  fn custom_url_builder() {
    let builder = UrlBuilder::new(|slug| format!("https://news.example/{slug}.html"));
    assert_eq!(builder.build("halving"), "https://news.example/halving.html");
  }
}
