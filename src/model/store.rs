//! ModelStore - Abstract versioned CRUD storage for models.

use super::{Model, ModelError, VersionToken, Versioned};

/// Abstract versioned CRUD storage for models.
///
/// Implementations must perform the version comparison and the write of
/// [`ModelStore::update_model`] atomically: of two writers holding the same
/// expected version, at most one may succeed.
pub trait ModelStore: Send + Sync {
    /// Get a model by ID. Returns None if not found.
    fn get_model<M: Model>(&self, id: &M::Id) -> Result<Option<Versioned<M>>, ModelError>;

    /// Insert a new model. Fails if it already exists.
    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;

    /// Conditionally update an existing model.
    ///
    /// Succeeds only if the stored version equals `expected`, issuing a new
    /// version. Fails with `NotFound` when the row is absent and
    /// `ConcurrencyConflict` when the versions differ.
    fn update_model<M: Model>(
        &self,
        model: &M,
        expected: VersionToken,
    ) -> Result<Versioned<M>, ModelError>;

    /// Delete a model by ID. Returns true if it existed.
    fn delete_model<M: Model>(&self, id: &M::Id) -> Result<bool, ModelError>;

    /// Find models matching a predicate.
    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError>;
}
