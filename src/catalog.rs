//! The news site's standard searchable sources.
//!
//! Five collections are searchable from the site header: articles,
//! airdrops, events, presales and categories. Only published articles are
//! eligible; every other collection is searched as-is.

use crate::filter::FilterExpr;
use crate::presenter::{FieldPresenter, UrlBuilder};
use crate::source::SearchableSource;
use crate::store::RecordStore;
use std::sync::Arc;

/// Key of the articles source.
pub const ARTICLES: &str = "articles";
/// Key of the airdrops source.
pub const AIRDROPS: &str = "airdrops";
/// Key of the events source.
pub const EVENTS: &str = "events";
/// Key of the presales source.
pub const PRESALES: &str = "presales";
/// Key of the categories source.
pub const CATEGORIES: &str = "categories";

/// Article `status` value that makes an article visible.
pub const PUBLISHED: &str = "published";

/// The backing stores of the standard sources.
#[derive(Clone)]
pub struct NewsStores {
  pub articles: Arc<dyn RecordStore>,
  pub airdrops: Arc<dyn RecordStore>,
  pub events: Arc<dyn RecordStore>,
  pub presales: Arc<dyn RecordStore>,
  pub categories: Arc<dyn RecordStore>,
}

/// Builds the standard sources, in fan-out order.
pub fn news_sources(stores: NewsStores) -> Vec<SearchableSource> {
  vec![
    SearchableSource::new(ARTICLES, stores.articles)
      .match_fields(["title", "excerpt", "content"])
      .constraint(FilterExpr::equals("status", PUBLISHED))
      .presenter(FieldPresenter::new().url_builder(UrlBuilder::prefix("/articles"))),
    SearchableSource::new(AIRDROPS, stores.airdrops)
      .match_fields(["name", "description"])
      .presenter(FieldPresenter::new().url_builder(UrlBuilder::prefix("/airdrops"))),
    SearchableSource::new(EVENTS, stores.events)
      .match_fields(["title", "description", "location"])
      .presenter(FieldPresenter::new().url_builder(UrlBuilder::prefix("/events"))),
    SearchableSource::new(PRESALES, stores.presales)
      .match_fields(["name", "description", "symbol"])
      .presenter(FieldPresenter::new().url_builder(UrlBuilder::prefix("/presales"))),
    SearchableSource::new(CATEGORIES, stores.categories)
      .match_fields(["name", "description"])
      .presenter(FieldPresenter::new().url_builder(UrlBuilder::prefix("/categories"))),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::Source;
  use crate::store::InMemStore;

  fn empty_stores() -> NewsStores {
    NewsStores {
      articles: Arc::new(InMemStore::new()),
      airdrops: Arc::new(InMemStore::new()),
      events: Arc::new(InMemStore::new()),
      presales: Arc::new(InMemStore::new()),
      categories: Arc::new(InMemStore::new()),
    }
  }

  #[test]
  fn sources_in_fan_out_order() {
    let keys: Vec<String> = news_sources(empty_stores())
      .iter()
      .map(|source| source.key().to_string())
      .collect();
    assert_eq!(keys, vec![ARTICLES, AIRDROPS, EVENTS, PRESALES, CATEGORIES]);
  }

  #[test]
  fn only_articles_are_constrained() {
    let sources = news_sources(empty_stores());
    let published = FilterExpr::equals("status", PUBLISHED);

    for source in &sources {
      let constrained = match source.filter_for("x") {
        FilterExpr::And(exprs) => exprs.contains(&published),
        _ => false,
      };
      assert_eq!(constrained, source.key() == ARTICLES, "{}", source.key());
    }
  }

  #[test]
  fn presales_match_on_symbol() {
    let sources = news_sources(empty_stores());
    let presales = sources
      .iter()
      .find(|source| source.key() == PRESALES)
      .expect("presales source");
    assert!(presales.fields().iter().any(|field| field == "symbol"));
  }
}
