//! Record stores: the data-access seam sources query.

pub mod adapter;
pub mod memory;

pub use adapter::{Lookup, RecordStore};
pub use memory::InMemStore;
