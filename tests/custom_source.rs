use chrono::{DateTime, TimeZone, Utc};
use multisearch::error::Result;
use multisearch::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn day(d: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 2, d, 8, 0, 0).unwrap()
}

/// Static site pages that never touch a database.
struct PagesSource {
  pages: Vec<(u64, &'static str, DateTime<Utc>)>,
}

impl Source for PagesSource {
  fn key(&self) -> &str {
    "pages"
  }

  fn lookup(&self, needle: &str, config: &AggregatorConfig) -> Result<Vec<SearchResult>> {
    let needle = needle.to_lowercase();
    let mut matches: Vec<SearchResult> = self
      .pages
      .iter()
      .filter(|(_, title, _)| title.to_lowercase().contains(&needle))
      .map(|(id, title, created_at)| SearchResult {
        id: *id,
        title: title.to_string(),
        source_key: "pages".to_string(),
        url: format!("/{}", title.to_lowercase().replace(' ', "-")),
        excerpt: String::new(),
        created_at: *created_at,
      })
      .collect();
    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matches.truncate(config.per_source_limit);
    Ok(matches)
  }
}

/// A store whose database is down.
struct UnreachableStore {
  calls: AtomicUsize,
}

impl RecordStore for UnreachableStore {
  fn select(&self, _lookup: &Lookup) -> Result<Vec<Record>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Err(SearchError::Store("connection refused".into()))
  }
}

/// A source that ignores the per-source limit.
struct FloodSource;

impl Source for FloodSource {
  fn key(&self) -> &str {
    "flood"
  }

  fn lookup(&self, needle: &str, _config: &AggregatorConfig) -> Result<Vec<SearchResult>> {
    Ok(
      (0..50)
        .map(|i| SearchResult {
          id: i,
          title: format!("{needle} {i}"),
          source_key: "flood".to_string(),
          url: "#".to_string(),
          excerpt: String::new(),
          created_at: day(1),
        })
        .collect(),
    )
  }
}

fn pages() -> PagesSource {
  PagesSource {
    pages: vec![
      (1, "About Crypto News", day(1)),
      (2, "Advertise With Us", day(3)),
      (3, "Crypto Glossary", day(2)),
    ],
  }
}

#[test]
fn test_custom_source() {
  let news = Arc::new(InMemStore::with_records(vec![Record::new(9, day(5))
    .with("title", "Crypto Weekly")
    .with("status", "published")]));

  let aggregator = SearchAggregator::builder()
    .source(pages())
    .source(SearchableSource::new("articles", news))
    .build()
    .unwrap();

  let results = aggregator.search("crypto", "all");
  let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
  assert_eq!(titles, vec!["Crypto Weekly", "Crypto Glossary", "About Crypto News"]);

  let only_pages = aggregator.search("crypto", "pages");
  assert_eq!(only_pages.len(), 2);
  assert_eq!(only_pages[0].url, "/crypto-glossary");
}

#[test]
fn test_failing_store_degrades_to_empty() {
  let store = Arc::new(UnreachableStore {
    calls: AtomicUsize::new(0),
  });

  let aggregator = SearchAggregator::builder()
    .source(pages())
    .source(SearchableSource::new("events", store.clone()))
    .build()
    .unwrap();

  // One broken source empties the whole search
  assert!(aggregator.search("crypto", "all").is_empty());
  assert_eq!(store.calls.load(Ordering::SeqCst), 1);

  let err = aggregator.try_search("crypto", "all").unwrap_err();
  assert!(matches!(err, SearchError::Store(_)));
  assert_eq!(err.to_string(), "store error: connection refused");

  // The healthy source still works on its own
  assert_eq!(aggregator.search("crypto", "pages").len(), 2);
}

#[test]
fn test_per_source_limit_enforced_for_custom_sources() {
  let aggregator = SearchAggregator::builder()
    .source(FloodSource)
    .config(AggregatorConfig {
      per_source_limit: 3,
      ..Default::default()
    })
    .build()
    .unwrap();

  let results = aggregator.search("spam", "all");
  assert_eq!(results.len(), 3);
  assert_eq!(results[0].title, "spam 0");
}

#[test]
fn test_duplicate_keys_rejected() {
  let err = SearchAggregator::builder()
    .source(pages())
    .source(pages())
    .build()
    .unwrap_err();
  assert!(matches!(err, SearchError::Config(_)));
}

/// A source that answers after a delay, all hits at the same instant.
struct DelayedSource {
  key: String,
  delay_ms: u64,
}

impl Source for DelayedSource {
  fn key(&self) -> &str {
    &self.key
  }

  fn lookup(&self, needle: &str, _config: &AggregatorConfig) -> Result<Vec<SearchResult>> {
    std::thread::sleep(std::time::Duration::from_millis(self.delay_ms));
    Ok(
      (0..2)
        .map(|i| SearchResult {
          id: i,
          title: format!("{needle} {i}"),
          source_key: self.key.clone(),
          url: "#".to_string(),
          excerpt: String::new(),
          created_at: day(4),
        })
        .collect(),
    )
  }
}

// Run with `--features parallel` to exercise the rayon fan-out.
#[cfg(feature = "parallel")]
#[test]
fn test_parallel_fan_out_keeps_source_order() {
  let keys = ["first", "second", "third", "fourth", "fifth", "sixth"];
  // Earlier sources answer last
  let aggregator = SearchAggregator::builder()
    .sources(keys.iter().enumerate().map(|(i, key)| DelayedSource {
      key: key.to_string(),
      delay_ms: 10 * (keys.len() - i) as u64,
    }))
    .build()
    .unwrap();

  for _ in 0..3 {
    let results = aggregator.search_all("ton");
    let order: Vec<(&str, u64)> = results
      .iter()
      .map(|r| (r.source_key.as_str(), r.id))
      .collect();
    let expected: Vec<(&str, u64)> = keys.iter().flat_map(|key| [(*key, 0), (*key, 1)]).collect();
    assert_eq!(order, expected);
  }
}
