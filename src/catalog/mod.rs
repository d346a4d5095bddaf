// src/catalog/mod.rs

//! In-memory catalog core: the immutable item store, the per-item interaction
//! state, the query/filter engine and the derived views kept in sync with it.

pub mod derived;
pub mod filter;
pub mod interaction;
pub mod loader;
pub mod session;
pub mod store;

use thiserror::Error;

pub use derived::{DerivedIndex, ViewCounts, ViewName};
pub use interaction::InteractionStore;
pub use session::{Event, Mutation, Outcome, Session};
pub use store::Catalog;

/// Failures raised by the catalog core.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A mutation or lookup addressed an id that is not in the catalog.
    #[error("item not found: {0}")]
    NotFound(String),

    /// Two items in one catalog share an id.
    #[error("duplicate item id: {0}")]
    DuplicateId(String),

    /// An item failed validation while loading.
    #[error("invalid item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },

    /// The operation does not apply to this kind of item.
    #[error("unsupported operation on '{id}': {reason}")]
    Unsupported { id: String, reason: String },

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
