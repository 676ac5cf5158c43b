//! Department index rows.

use serde::Serialize;

use crate::model::{ModelError, ModelStore, ModelsExt};

use super::{Department, Formatting, InstructorDirectory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub id: i32,
    pub name: String,
    pub budget: String,
    pub start_date: String,
    pub administrator: Option<String>,
    pub version_diagnostic: String,
}

/// All departments ordered by id, with display values resolved.
pub fn list_departments<S: ModelStore>(
    store: &S,
    formatting: &Formatting,
) -> Result<Vec<DepartmentSummary>, ModelError> {
    let mut departments = store.models::<Department>().all()?;
    departments.sort_by_key(|department| department.data.id);

    departments
        .into_iter()
        .map(|department| -> Result<DepartmentSummary, ModelError> {
            let administrator = match department.data.administrator_id {
                Some(id) => store.full_name(id)?,
                None => None,
            };
            Ok(DepartmentSummary {
                id: department.data.id,
                budget: formatting.currency(department.data.budget),
                start_date: formatting.short_date(department.data.start_date),
                name: department.data.name,
                administrator,
                version_diagnostic: department.version.diagnostic(),
            })
        })
        .collect()
}
