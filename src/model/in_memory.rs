//! InMemoryModelStore - HashMap-backed model store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Model, ModelError, ModelStore, VersionToken, Versioned};

/// Internal stored representation of a model.
struct StoredModel {
    bytes: Vec<u8>,
    version: VersionToken,
}

#[derive(Default)]
struct Storage {
    rows: HashMap<String, StoredModel>,
    /// Store-wide row version clock; every write takes the next value.
    clock: u64,
}

impl Storage {
    fn next_version(&mut self) -> VersionToken {
        self.clock += 1;
        VersionToken::from_counter(self.clock)
    }
}

/// In-memory model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc. Row versions
/// come from a single monotonic clock, so a token is never reissued.
#[derive(Clone)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<Storage>>,
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryModelStore {
    /// Create a new empty model store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Storage::default())),
        }
    }

    fn make_key<M: Model>(id: &M::Id) -> String {
        format!("{}:{}", M::COLLECTION, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, ModelError> {
        self.storage
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, ModelError> {
        self.storage
            .write()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }

    fn decode<M: Model>(stored: &StoredModel) -> Result<Versioned<M>, ModelError> {
        let data: M =
            serde_json::from_slice(&stored.bytes).map_err(|e| ModelError::Serde(e.to_string()))?;
        Ok(Versioned {
            data,
            version: stored.version,
        })
    }
}

impl ModelStore for InMemoryModelStore {
    fn get_model<M: Model>(&self, id: &M::Id) -> Result<Option<Versioned<M>>, ModelError> {
        let key = Self::make_key::<M>(id);
        let storage = self.read()?;

        storage.rows.get(&key).map(Self::decode::<M>).transpose()
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let id = model.id();
        let key = Self::make_key::<M>(&id);
        let bytes = serde_json::to_vec(model).map_err(|e| ModelError::Serde(e.to_string()))?;

        let mut storage = self.write()?;

        if let Some(existing) = storage.rows.get(&key) {
            return Err(ModelError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: id.to_string(),
                expected: VersionToken::default(),
                actual: existing.version,
            });
        }

        let version = storage.next_version();
        storage.rows.insert(key, StoredModel { bytes, version });

        Ok(Versioned {
            data: model.clone(),
            version,
        })
    }

    fn update_model<M: Model>(
        &self,
        model: &M,
        expected: VersionToken,
    ) -> Result<Versioned<M>, ModelError> {
        let id = model.id();
        let key = Self::make_key::<M>(&id);
        let bytes = serde_json::to_vec(model).map_err(|e| ModelError::Serde(e.to_string()))?;

        // Compare and swap under one write guard.
        let mut storage = self.write()?;

        let actual = storage
            .rows
            .get(&key)
            .map(|s| s.version)
            .ok_or_else(|| ModelError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: id.to_string(),
            })?;

        if actual != expected {
            return Err(ModelError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: id.to_string(),
                expected,
                actual,
            });
        }

        let version = storage.next_version();
        storage.rows.insert(key, StoredModel { bytes, version });

        Ok(Versioned {
            data: model.clone(),
            version,
        })
    }

    fn delete_model<M: Model>(&self, id: &M::Id) -> Result<bool, ModelError> {
        let key = Self::make_key::<M>(id);
        let mut storage = self.write()?;

        Ok(storage.rows.remove(&key).is_some())
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let storage = self.read()?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.rows.iter() {
            if key.starts_with(&prefix) {
                let versioned = Self::decode::<M>(stored)?;
                if predicate(&versioned.data) {
                    results.push(versioned);
                }
            }
        }

        Ok(results)
    }
}
