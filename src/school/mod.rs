//! School records: departments, their administrators, and the
//! concurrency-aware department edit flow.

mod conflict;
mod directory;
mod editor;
mod form;
mod format;
mod listing;

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Model;

pub use conflict::{
    diff_fields, FieldError, CONCURRENT_EDIT, DELETED_DURING_SAVE, RECORD_GONE,
};
pub use directory::{AdministratorChoice, InstructorDirectory};
pub use editor::{
    ConflictReport, DepartmentEditor, EditError, EditOutcome, EditRequest, EditResponse, EditView,
    LIST_PATH,
};
pub use form::{EditForm, ValidationError, ValidationErrors};
pub use format::Formatting;
pub use listing::{list_departments, DepartmentSummary};

/// An academic department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub budget: Decimal,
    pub start_date: NaiveDate,
    /// The administering instructor, if any.
    pub administrator_id: Option<i32>,
}

impl Department {
    pub fn new(id: i32, fields: DepartmentFields) -> Self {
        Self {
            id,
            name: fields.name,
            budget: fields.budget,
            start_date: fields.start_date,
            administrator_id: fields.administrator_id,
        }
    }

    /// Copy the mutable fields onto this record. `id` is left alone.
    pub fn apply(&mut self, fields: &DepartmentFields) {
        self.name = fields.name.clone();
        self.budget = fields.budget;
        self.start_date = fields.start_date;
        self.administrator_id = fields.administrator_id;
    }

    pub fn fields(&self) -> DepartmentFields {
        DepartmentFields {
            name: self.name.clone(),
            budget: self.budget,
            start_date: self.start_date,
            administrator_id: self.administrator_id,
        }
    }
}

impl Model for Department {
    const COLLECTION: &'static str = "departments";
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}

/// The user-editable part of a department.
///
/// Also serves as the unsaved record echoed back when the department has
/// been deleted out from under an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentFields {
    pub name: String,
    pub budget: Decimal,
    pub start_date: NaiveDate,
    pub administrator_id: Option<i32>,
}

/// Identifies one of the mutable department fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentField {
    Name,
    Budget,
    StartDate,
    AdministratorId,
}

impl DepartmentField {
    pub const ALL: [DepartmentField; 4] = [
        DepartmentField::Name,
        DepartmentField::Budget,
        DepartmentField::StartDate,
        DepartmentField::AdministratorId,
    ];

    /// Key of the matching input on the edit form.
    pub fn form_key(&self) -> &'static str {
        match self {
            DepartmentField::Name => "Department.Name",
            DepartmentField::Budget => "Department.Budget",
            DepartmentField::StartDate => "Department.StartDate",
            DepartmentField::AdministratorId => "Department.InstructorID",
        }
    }
}

impl fmt::Display for DepartmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_key())
    }
}

/// An instructor who may administer a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
}

impl Instructor {
    pub fn new(id: i32, last_name: impl Into<String>, first_mid_name: impl Into<String>) -> Self {
        Self {
            id,
            last_name: last_name.into(),
            first_mid_name: first_mid_name.into(),
        }
    }

    /// "First Last", skipping blank parts.
    pub fn full_name(&self) -> String {
        [self.first_mid_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Model for Instructor {
    const COLLECTION: &'static str = "instructors";
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}
