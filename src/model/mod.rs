//! Models - versioned, storage-backed records with optimistic concurrency.
//!
//! Models provide a small CRUD abstraction over a backing store. Every
//! stored row carries a [`VersionToken`] that the store reissues on each
//! successful write; conditional updates compare it against the token the
//! caller read.
//!
//! ## Example
//!
//! ```ignore
//! use campus_records::model::{InMemoryModelStore, Model, ModelsExt};
//!
//! let store = InMemoryModelStore::new();
//! let saved = store.models::<Department>().insert(&department)?;
//! let loaded = store.models::<Department>().get(&department.id)?;
//! store.models::<Department>().update(&edited, saved.version)?;
//! ```

mod in_memory;
mod model_repository;
mod store;
mod version;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this model type (e.g., "departments").
    /// Maps to a table in SQL or a key prefix in KV stores.
    const COLLECTION: &'static str;

    /// Identifier type of the collection.
    type Id: fmt::Display + Clone + Send + Sync;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> Self::Id;
}

/// A versioned wrapper around model data for optimistic concurrency control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Versioned<T> {
    pub data: T,
    pub version: VersionToken,
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The stored version no longer matches the expected one.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected:?}, actual {actual:?})")]
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: VersionToken,
        actual: VersionToken,
    },
    #[error("model serialization error: {0}")]
    Serde(String),
    #[error("model storage error: {0}")]
    Storage(String),
    #[error("model not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
}

impl ModelError {
    /// True when a conditional write failed because the row changed or vanished.
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            ModelError::ConcurrencyConflict { .. } | ModelError::NotFound { .. }
        )
    }
}

pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
pub use version::{TokenError, VersionToken, TOKEN_LEN};
