//! Defines the `RecordStore` trait for plugging in data-access backends.

use crate::error::Result;
use crate::filter::FilterExpr;
use crate::types::Record;

/// A read query against one content collection.
///
/// The ordering is fixed: matching records come back newest first (by
/// `created_at`), at most `limit` of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
  /// The where-clause every returned record must satisfy.
  pub filter: FilterExpr,
  /// Maximum number of records to return.
  pub limit: usize,
}

impl Lookup {
  /// Creates a lookup for the newest `limit` records matching `filter`.
  pub fn new(filter: FilterExpr, limit: usize) -> Self {
    Self { filter, limit }
  }
}

/// A trait that defines the common interface for a content collection.
///
/// `RecordStore` abstracts over where records actually live. The aggregator
/// ships an in-memory implementation; production deployments put their
/// database access behind this trait.
///
/// The `Send` and `Sync` bounds are required to allow stores to be shared
/// by sources that are queried concurrently.
pub trait RecordStore: Send + Sync {
  /// Returns the newest records matching `lookup.filter`, at most
  /// `lookup.limit` of them.
  ///
  /// # Errors
  ///
  /// Returns [`SearchError::Store`](crate::error::SearchError::Store) if the
  /// backing store cannot be read.
  fn select(&self, lookup: &Lookup) -> Result<Vec<Record>>;
}
