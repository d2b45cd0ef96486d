//! News site search example: the five standard sources over in-memory stores.
//!
//! Run with `RUST_LOG=multisearch=trace` to see the search diagnostics.

use chrono::{Duration, Utc};
use multisearch::catalog::{news_sources, NewsStores};
use multisearch::prelude::*;
use std::sync::Arc;

fn sample_stores() -> NewsStores {
  let now = Utc::now();

  let articles = InMemStore::with_records(vec![
    Record::new(1, now - Duration::hours(2))
      .with("title", "Bitcoin ETF Approved")
      .with("slug", "bitcoin-etf-approved")
      .with("status", "published")
      .with("excerpt", "Regulators sign off on the first spot bitcoin ETFs."),
    Record::new(2, now - Duration::minutes(10))
      .with("title", "Bitcoin Crash Incoming")
      .with("slug", "bitcoin-crash-incoming")
      .with("status", "draft"),
  ]);

  let airdrops = InMemStore::with_records(vec![Record::new(1, now - Duration::days(1))
    .with("name", "Bitcoin Layer 2 Airdrop")
    .with("slug", "bitcoin-layer-2-airdrop")
    .with(
      "description",
      "<p>Bridge at least <strong>0.01 BTC</strong> to qualify for the points programme.</p>",
    )]);

  let events = InMemStore::with_records(vec![Record::new(1, now - Duration::hours(5))
    .with("title", "Bitcoin Conference")
    .with("slug", "bitcoin-conference")
    .with("location", "Nashville")
    .with("content", "<h2>Three days</h2><p>of talks, workshops and parties.</p>")]);

  let presales = InMemStore::with_records(vec![Record::new(1, now - Duration::days(3))
    .with("name", "Satoshi Vault")
    .with("symbol", "SVLT")
    .with("slug", "satoshi-vault")
    .with("description", "Bitcoin-backed yield vault token.")]);

  let categories = InMemStore::with_records(vec![Record::new(1, now - Duration::days(400))
    .with("name", "Bitcoin")
    .with("slug", "bitcoin")]);

  NewsStores {
    articles: Arc::new(articles),
    airdrops: Arc::new(airdrops),
    events: Arc::new(events),
    presales: Arc::new(presales),
    categories: Arc::new(categories),
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  println!("=== News Search Example ===\n");

  let aggregator = match SearchAggregator::builder()
    .sources(news_sources(sample_stores()))
    .build()
  {
    Ok(aggregator) => aggregator,
    Err(err) => {
      eprintln!("invalid search setup: {err}");
      return;
    }
  };

  println!("Sources: {}\n", aggregator.source_keys().join(", "));

  for (query, filter) in [("bitcoin", "all"), ("bitcoin", "events"), ("bit%coin", "videos")] {
    println!("Query: text=\"{query}\" type=\"{filter}\"");

    let results = aggregator.search(query, filter);
    if results.is_empty() {
      println!("   (no results)");
    }

    for (i, result) in results.iter().enumerate() {
      println!("{}. [{}] {} -> {}", i + 1, result.source_key, result.title, result.url);
      if !result.excerpt.is_empty() {
        println!("   {}", result.excerpt);
      }
    }
    println!();
  }

  let response = aggregator.handle(&SearchRequest::new("airdrop"));
  match serde_json::to_string_pretty(&response) {
    Ok(json) => println!("JSON response:\n{json}"),
    Err(err) => eprintln!("could not serialize response: {err}"),
  }
}
