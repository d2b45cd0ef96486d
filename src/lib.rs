//! Multisearch - keyword search across several content collections.
//!
//! Multisearch takes one free-text query, matches it by case-insensitive
//! substring against a set of named sources (articles, events, ...), and
//! merges the hits into one uniform, newest-first result list. Searching is
//! best-effort: failures degrade to an empty result instead of an error.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod presenter;
pub mod registry;
pub mod source;
pub mod store;
pub mod text;
pub mod types;

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::config::*;
  pub use crate::engine::*;
  pub use crate::error::SearchError;
  pub use crate::filter::*;
  pub use crate::presenter::*;
  pub use crate::registry::*;
  pub use crate::source::*;
  pub use crate::store::*;
  pub use crate::types::*;
}
