//! Field-by-field comparison of a department's stored values against an
//! edit that lost an optimistic-concurrency race.

use serde::Serialize;

use crate::model::ModelError;

use super::{Department, DepartmentField, DepartmentFields, Formatting, InstructorDirectory};

pub const RECORD_GONE: &str = "Unable to save. The department was deleted by another user.";

pub const DELETED_DURING_SAVE: &str =
    "Unable to save changes. The department was deleted by another user.";

pub const CONCURRENT_EDIT: &str = "The record you attempted to edit was modified by another \
     user after you got the original value. The edit operation was canceled and the current \
     values in the database have been displayed. If you still want to edit this record, click \
     the Save button again. Otherwise click the Back to List hyperlink.";

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: DepartmentField,
    pub message: String,
}

impl FieldError {
    fn current_value(field: DepartmentField, value: impl AsRef<str>) -> Self {
        Self {
            field,
            message: format!("Current value: {}", value.as_ref()),
        }
    }
}

/// Compare the stored department against the attempted values.
///
/// Yields one error per differing field, in form order, each citing the
/// stored value. The directory is consulted only when the administrator
/// differs and the stored one is set.
pub fn diff_fields<D: InstructorDirectory + ?Sized>(
    current: &Department,
    attempted: &DepartmentFields,
    directory: &D,
    formatting: &Formatting,
) -> Result<Vec<FieldError>, ModelError> {
    let mut errors = Vec::new();

    if current.name != attempted.name {
        errors.push(FieldError::current_value(DepartmentField::Name, &current.name));
    }
    if current.budget != attempted.budget {
        errors.push(FieldError::current_value(
            DepartmentField::Budget,
            formatting.currency(current.budget),
        ));
    }
    if current.start_date != attempted.start_date {
        errors.push(FieldError::current_value(
            DepartmentField::StartDate,
            formatting.short_date(current.start_date),
        ));
    }
    if current.administrator_id != attempted.administrator_id {
        let name = match current.administrator_id {
            Some(id) => directory.full_name(id)?.unwrap_or_default(),
            None => String::new(),
        };
        errors.push(FieldError::current_value(
            DepartmentField::AdministratorId,
            name,
        ));
    }

    Ok(errors)
}
