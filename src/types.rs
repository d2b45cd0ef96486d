//! Core data types for the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Type alias for record identifiers.
///
/// Records come out of relational tables with integer primary keys, so the
/// identifier is kept numeric all the way to the wire.
pub type EntityId = u64;

/// The filter value that selects every configured source.
pub const ALL_SOURCES: &str = "all";

/// One row of a backing content collection.
///
/// A `Record` is what the data-access layer hands to a source: the primary
/// key, the creation timestamp used for ordering, and the remaining columns as
/// a JSON attribute map. Attribute names are the column names of the
/// collection (`title`, `slug`, `status`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  /// Primary key of the row.
  pub id: EntityId,
  /// Creation timestamp. Newest records sort first.
  pub created_at: DateTime<Utc>,
  /// All other columns, keyed by name.
  #[serde(default)]
  pub attributes: Map<String, Value>,
}

impl Record {
  /// Creates a record with no attributes.
  pub fn new(id: EntityId, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      created_at,
      attributes: Map::new(),
    }
  }

  /// Sets an attribute, returning the record for chaining.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.attributes.insert(name.into(), value.into());
    self
  }

  /// Looks up an attribute by name.
  ///
  /// Dotted paths (`"author.name"`) walk into nested objects.
  pub fn attribute(&self, path: &str) -> Option<&Value> {
    let mut parts = path.split('.');
    let mut current = self.attributes.get(parts.next()?)?;

    for part in parts {
      current = current.get(part)?;
    }

    Some(current)
  }

  /// Returns an attribute rendered as text.
  ///
  /// Strings are returned as-is, numbers and booleans are stringified. Nulls,
  /// arrays and objects have no text form and yield `None`.
  pub fn text(&self, path: &str) -> Option<String> {
    scalar_text(self.attribute(path)?)
  }

  /// Returns the record's slug if it has a non-empty one.
  pub fn slug(&self) -> Option<String> {
    self.text("slug").filter(|s| !s.is_empty())
  }
}

/// Renders a scalar JSON value as text.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// A single search hit in the uniform result shape.
///
/// Results are derived per query and never cached. The serialized form is
/// the boundary shape consumed by the HTTP layer:
/// `{ id, title, type, url, excerpt, created_at }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
  /// Identifier of the originating record.
  pub id: EntityId,
  /// Display title.
  pub title: String,
  /// Key of the source the record came from.
  #[serde(rename = "type")]
  pub source_key: String,
  /// Canonical link, or `"#"` when the source cannot build one.
  pub url: String,
  /// Short plain-text summary.
  pub excerpt: String,
  /// Creation timestamp of the record, serialized as RFC 3339.
  pub created_at: DateTime<Utc>,
}

/// Which sources a search should consult.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SourceFilter {
  /// Every configured source.
  #[default]
  All,
  /// Only the source with this key.
  Only(String),
}

impl SourceFilter {
  /// Parses a filter value. Only the exact literal `"all"` selects every source.
  pub fn parse(value: &str) -> Self {
    if value == ALL_SOURCES {
      SourceFilter::All
    } else {
      SourceFilter::Only(value.to_string())
    }
  }
}

impl From<&str> for SourceFilter {
  fn from(value: &str) -> Self {
    Self::parse(value)
  }
}

impl fmt::Display for SourceFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SourceFilter::All => f.write_str(ALL_SOURCES),
      SourceFilter::Only(key) => f.write_str(key),
    }
  }
}

/// The boundary input of a search: `{ query, type }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
  /// Free text typed by the user.
  #[serde(default)]
  pub query: String,
  /// Source filter; `"all"` when absent.
  #[serde(rename = "type", default = "default_source_type")]
  pub source_type: String,
}

fn default_source_type() -> String {
  ALL_SOURCES.to_string()
}

impl SearchRequest {
  /// Creates a request against every source.
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query: query.into(),
      source_type: default_source_type(),
    }
  }

  /// Restricts the request to one source.
  pub fn source_type(mut self, source_type: impl Into<String>) -> Self {
    self.source_type = source_type.into();
    self
  }
}

/// The boundary output envelope handed back to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
  /// The query text, trimmed.
  pub query: String,
  /// The source filter the search ran with.
  #[serde(rename = "type")]
  pub source_type: String,
  /// Number of results.
  pub total: usize,
  /// The results, newest first.
  pub results: Vec<SearchResult>,
}
