//! Instructor lookups used to name department administrators.

use serde::Serialize;

use crate::model::{ModelError, ModelStore, ModelsExt};

use super::Instructor;

/// One entry of the administrator drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdministratorChoice {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

/// Read-only view of the instructors.
pub trait InstructorDirectory {
    /// Display name of an instructor, or `None` when there is no such instructor.
    fn full_name(&self, id: i32) -> Result<Option<String>, ModelError>;

    /// All instructors ordered by id, with `selected` marked.
    fn administrator_choices(
        &self,
        selected: Option<i32>,
    ) -> Result<Vec<AdministratorChoice>, ModelError>;
}

impl<S: ModelStore> InstructorDirectory for S {
    fn full_name(&self, id: i32) -> Result<Option<String>, ModelError> {
        Ok(self
            .models::<Instructor>()
            .get(&id)?
            .map(|instructor| instructor.data.full_name()))
    }

    fn administrator_choices(
        &self,
        selected: Option<i32>,
    ) -> Result<Vec<AdministratorChoice>, ModelError> {
        let mut instructors = self.models::<Instructor>().all()?;
        instructors.sort_by_key(|instructor| instructor.data.id);

        Ok(instructors
            .into_iter()
            .map(|instructor| AdministratorChoice {
                id: instructor.data.id,
                name: instructor.data.full_name(),
                selected: selected == Some(instructor.data.id),
            })
            .collect())
    }
}
