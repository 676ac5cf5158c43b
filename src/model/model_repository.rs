//! ModelRepository - Typed accessor for model CRUD operations.

use std::marker::PhantomData;

use super::{Model, ModelError, ModelStore, VersionToken, Versioned};

/// Typed repository wrapper for accessing models of a specific type.
pub struct ModelRepository<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: ModelStore, M: Model> ModelRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a model by ID.
    pub fn get(&self, id: &M::Id) -> Result<Option<Versioned<M>>, ModelError> {
        self.store.get_model(id)
    }

    /// Insert a new model. Fails if it already exists.
    pub fn insert(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        self.store.insert_model(model)
    }

    /// Update an existing model, provided it is still at `expected`.
    pub fn update(&self, model: &M, expected: VersionToken) -> Result<Versioned<M>, ModelError> {
        self.store.update_model(model, expected)
    }

    /// Delete a model by ID. Returns true if it existed.
    pub fn delete(&self, id: &M::Id) -> Result<bool, ModelError> {
        self.store.delete_model::<M>(id)
    }

    /// Every model in the collection.
    pub fn all(&self) -> Result<Vec<Versioned<M>>, ModelError> {
        self.store.find_models(&|_: &M| true)
    }
}

/// Extension trait for typed model access on any ModelStore.
pub trait ModelsExt: ModelStore + Sized {
    /// Get a typed model repository.
    fn models<M: Model>(&self) -> ModelRepository<'_, Self, M> {
        ModelRepository::new(self)
    }
}

impl<S: ModelStore> ModelsExt for S {}
