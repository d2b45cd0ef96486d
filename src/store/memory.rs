//! In-memory record store implementation.

use crate::error::Result;
use crate::store::adapter::{Lookup, RecordStore};
use crate::types::{EntityId, Record};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory record store.
///
/// Records are kept in insertion order; replacing a record keeps its
/// original position. Insertion order breaks ties between equal timestamps.
pub struct InMemStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    positions: HashMap<EntityId, usize>,
}

impl InMemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Create a store holding `records`.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::new();
        for record in records {
            store.put(record);
        }
        store
    }

    /// Add or replace a record, keyed by its id.
    pub fn put(&self, record: Record) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        match inner.positions.get(&record.id).copied() {
            Some(position) => inner.records[position] = record,
            None => {
                let position = inner.records.len();
                inner.positions.insert(record.id, position);
                inner.records.push(record);
            }
        }
    }

    /// Remove a record by id, returning it if it was present.
    pub fn remove(&self, id: EntityId) -> Option<Record> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let position = inner.positions.remove(&id)?;
        let record = inner.records.remove(position);
        for slot in inner.positions.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(record)
    }

    /// Get a copy of a record by id.
    pub fn get(&self, id: EntityId) -> Option<Record> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let position = *inner.positions.get(&id)?;
        inner.records.get(position).cloned()
    }

    /// Copies of all records, in insertion order.
    pub fn all(&self) -> Vec<Record> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemStore {
    fn select(&self, lookup: &Lookup) -> Result<Vec<Record>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);

        let mut matches: Vec<&Record> = inner
            .records
            .iter()
            .filter(|record| lookup.filter.evaluate(record))
            .collect();

        // Stable, so equal timestamps keep insertion order
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matches.into_iter().take(lookup.limit).cloned().collect())
    }
}
