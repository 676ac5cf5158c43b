//! DepartmentEditor - reads a department for editing and applies edits
//! with optimistic concurrency.
//!
//! An edit carries the version token the client saw when it loaded the
//! form. The write is conditional on that token still being current. When
//! it is not, nothing is written: the editor re-reads the row and reports
//! which fields now differ from what the user submitted, along with the
//! fresh token a deliberate resubmission must carry. Conflicts are never
//! merged or retried automatically.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{ModelError, ModelStore, ModelsExt, VersionToken, Versioned};

use super::{
    diff_fields, AdministratorChoice, Department, DepartmentFields, EditForm, FieldError,
    Formatting, InstructorDirectory, ValidationErrors, CONCURRENT_EDIT, DELETED_DURING_SAVE,
    RECORD_GONE,
};

/// Where a successful save sends the user.
pub const LIST_PATH: &str = "/departments";

/// Failures that end the request instead of re-presenting the form.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("department id is required")]
    MissingId,
    #[error("department {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Store(#[from] ModelError),
}

/// A validated edit of one department.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRequest {
    pub id: i32,
    pub fields: DepartmentFields,
    /// Token captured when the edit form was rendered.
    pub version: VersionToken,
}

/// Another writer changed the department first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport {
    /// One entry per field whose stored value differs from the submission.
    pub field_errors: Vec<FieldError>,
    pub error: String,
    /// Token of the stored row; the next submission must carry it.
    pub refreshed_version: VersionToken,
    pub current: Department,
}

/// Result of [`DepartmentEditor::apply_edit`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The store now holds the submitted values under a new token.
    Saved(Versioned<Department>),
    /// The department was already gone when the edit arrived.
    RecordGone {
        /// Unsaved record built from the submission alone.
        attempted: DepartmentFields,
        error: String,
        administrators: Vec<AdministratorChoice>,
    },
    /// The department was deleted between the read and the conditional write.
    DeletedDuringSave { error: String },
    Conflict(ConflictReport),
}

/// Data for rendering the edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditView {
    pub department: Department,
    pub row_version: VersionToken,
    pub version_diagnostic: String,
    pub administrator: Option<String>,
    pub budget_display: String,
    pub start_date_display: String,
    pub administrators: Vec<AdministratorChoice>,
}

/// Response to a posted edit form, tagged for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EditResponse {
    Saved {
        department: Department,
        row_version: VersionToken,
        redirect: &'static str,
    },
    Invalid {
        form: EditForm,
        errors: ValidationErrors,
        administrators: Vec<AdministratorChoice>,
    },
    RecordGone {
        department: DepartmentFields,
        error: String,
        administrators: Vec<AdministratorChoice>,
    },
    Deleted {
        form: EditForm,
        error: String,
        administrators: Vec<AdministratorChoice>,
    },
    Conflict {
        /// The submitted values, carrying the refreshed token.
        form: EditForm,
        field_errors: Vec<FieldError>,
        error: String,
        current: Department,
        version_diagnostic: String,
        administrators: Vec<AdministratorChoice>,
    },
}

/// Edits departments held in a [`ModelStore`].
pub struct DepartmentEditor<'a, S> {
    store: &'a S,
    formatting: &'a Formatting,
}

impl<'a, S: ModelStore> DepartmentEditor<'a, S> {
    pub fn new(store: &'a S, formatting: &'a Formatting) -> Self {
        Self { store, formatting }
    }

    /// Load a department and everything the edit form displays.
    pub fn load(&self, id: Option<i32>) -> Result<EditView, EditError> {
        let id = id.ok_or(EditError::MissingId)?;
        let Versioned {
            data: department,
            version,
        } = self
            .store
            .models::<Department>()
            .get(&id)?
            .ok_or(EditError::NotFound(id))?;

        let administrator = match department.administrator_id {
            Some(instructor) => self.store.full_name(instructor)?,
            None => None,
        };
        let administrators = self
            .store
            .administrator_choices(department.administrator_id)?;

        debug!(department_id = id, version = %version.diagnostic(), "loaded department for edit");

        Ok(EditView {
            budget_display: self.formatting.currency(department.budget),
            start_date_display: self.formatting.short_date(department.start_date),
            department,
            row_version: version,
            version_diagnostic: version.diagnostic(),
            administrator,
            administrators,
        })
    }

    /// Apply a validated edit as a single conditional write.
    ///
    /// Version mismatches and rows deleted in the meantime are reported as
    /// outcomes. Any other store failure is returned as an error.
    #[tracing::instrument(level = "debug", skip_all, fields(department_id = request.id))]
    pub fn apply_edit(&self, request: &EditRequest) -> Result<EditOutcome, ModelError> {
        let departments = self.store.models::<Department>();

        let Some(live) = departments.get(&request.id)? else {
            warn!("department was deleted before the edit arrived");
            let administrators = self
                .store
                .administrator_choices(request.fields.administrator_id)?;
            return Ok(EditOutcome::RecordGone {
                attempted: request.fields.clone(),
                error: RECORD_GONE.to_string(),
                administrators,
            });
        };

        // The live token is ignored: the write is conditioned on the one the
        // client rendered with.
        let mut department = live.data;
        department.apply(&request.fields);

        match departments.update(&department, request.version) {
            Ok(saved) => {
                info!(
                    version = %saved.version.diagnostic(),
                    "department saved"
                );
                Ok(EditOutcome::Saved(saved))
            }
            Err(e) if e.is_precondition_failure() => {
                debug!(error = %e, "conditional write rejected");
                self.resolve_conflict(request)
            }
            Err(e) => Err(e),
        }
    }

    fn resolve_conflict(&self, request: &EditRequest) -> Result<EditOutcome, ModelError> {
        let Some(current) = self.store.models::<Department>().get(&request.id)? else {
            warn!("department was deleted by another user during the edit");
            return Ok(EditOutcome::DeletedDuringSave {
                error: DELETED_DURING_SAVE.to_string(),
            });
        };

        let field_errors = diff_fields(&current.data, &request.fields, self.store, self.formatting)?;
        warn!(
            fields = field_errors.len(),
            captured = %request.version.diagnostic(),
            current = %current.version.diagnostic(),
            "department was modified by another user"
        );

        Ok(EditOutcome::Conflict(ConflictReport {
            field_errors,
            error: CONCURRENT_EDIT.to_string(),
            refreshed_version: current.version,
            current: current.data,
        }))
    }

    /// Handle a posted edit form end to end.
    ///
    /// A missing or unknown id fails the request. Invalid input is echoed
    /// back without touching the store. Everything else goes through
    /// [`DepartmentEditor::apply_edit`].
    pub fn submit(&self, id: Option<i32>, form: &EditForm) -> Result<EditResponse, EditError> {
        let id = id.ok_or(EditError::MissingId)?;

        let (fields, version) = match form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                debug!(department_id = id, "edit form failed validation");
                return Ok(EditResponse::Invalid {
                    form: form.clone(),
                    errors,
                    administrators: self.store.administrator_choices(form.administrator_id)?,
                });
            }
        };

        let request = EditRequest {
            id,
            fields,
            version,
        };

        let response = match self.apply_edit(&request)? {
            EditOutcome::Saved(saved) => EditResponse::Saved {
                department: saved.data,
                row_version: saved.version,
                redirect: LIST_PATH,
            },
            EditOutcome::RecordGone {
                attempted,
                error,
                administrators,
            } => EditResponse::RecordGone {
                department: attempted,
                error,
                administrators,
            },
            EditOutcome::DeletedDuringSave { error } => EditResponse::Deleted {
                form: form.clone(),
                error,
                administrators: self
                    .store
                    .administrator_choices(request.fields.administrator_id)?,
            },
            EditOutcome::Conflict(report) => EditResponse::Conflict {
                form: EditForm::from_fields(&request.fields, report.refreshed_version),
                field_errors: report.field_errors,
                error: report.error,
                version_diagnostic: report.refreshed_version.diagnostic(),
                current: report.current,
                administrators: self
                    .store
                    .administrator_choices(request.fields.administrator_id)?,
            },
        };

        Ok(response)
    }
}
