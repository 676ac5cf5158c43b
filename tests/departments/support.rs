//! Shared fixtures: a seeded store and a store that lets another writer
//! slip in between the editor's read and its conditional write.

use std::sync::Mutex;

use campus_records::model::{
    InMemoryModelStore, Model, ModelError, ModelStore, ModelsExt, VersionToken, Versioned,
};
use campus_records::school::{Department, DepartmentFields, Instructor};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const DEPARTMENT_ID: i32 = 12;

pub fn economics() -> Department {
    Department {
        id: DEPARTMENT_ID,
        name: "Economics".into(),
        budget: Decimal::new(45_000, 0),
        start_date: NaiveDate::from_ymd_opt(2007, 9, 1).unwrap(),
        administrator_id: Some(7),
    }
}

/// Instructors 3 (Sam Smith) and 7 (Jane Doe) plus department 12.
pub fn seeded() -> (InMemoryModelStore, Versioned<Department>) {
    let store = InMemoryModelStore::new();
    let instructors = store.models::<Instructor>();
    instructors.insert(&Instructor::new(3, "Smith", "Sam")).unwrap();
    instructors.insert(&Instructor::new(7, "Doe", "Jane")).unwrap();
    let saved = store.models::<Department>().insert(&economics()).unwrap();
    (store, saved)
}

/// Simulate another user saving the department with `fields`.
pub fn other_user_saves(
    store: &InMemoryModelStore,
    fields: &DepartmentFields,
) -> Versioned<Department> {
    let departments = store.models::<Department>();
    let current = departments.get(&DEPARTMENT_ID).unwrap().unwrap();
    let mut department = current.data;
    department.apply(fields);
    departments.update(&department, current.version).unwrap()
}

type Interference = Box<dyn FnOnce(&InMemoryModelStore) + Send>;

/// Runs a one-shot interference against the inner store right before the
/// first conditional write.
pub struct RacingStore {
    inner: InMemoryModelStore,
    before_update: Mutex<Option<Interference>>,
}

impl RacingStore {
    pub fn new(
        inner: InMemoryModelStore,
        interference: impl FnOnce(&InMemoryModelStore) + Send + 'static,
    ) -> Self {
        Self {
            inner,
            before_update: Mutex::new(Some(Box::new(interference))),
        }
    }
}

impl ModelStore for RacingStore {
    fn get_model<M: Model>(&self, id: &M::Id) -> Result<Option<Versioned<M>>, ModelError> {
        self.inner.get_model(id)
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        self.inner.insert_model(model)
    }

    fn update_model<M: Model>(
        &self,
        model: &M,
        expected: VersionToken,
    ) -> Result<Versioned<M>, ModelError> {
        let interference = self.before_update.lock().unwrap().take();
        if let Some(interfere) = interference {
            interfere(&self.inner);
        }
        self.inner.update_model(model, expected)
    }

    fn delete_model<M: Model>(&self, id: &M::Id) -> Result<bool, ModelError> {
        self.inner.delete_model::<M>(id)
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        self.inner.find_models(predicate)
    }
}
