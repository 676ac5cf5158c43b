//! University records service.
//!
//! Departments are edited with optimistic concurrency: every stored row
//! carries a version token, edits are written only if the token the user
//! loaded is still current, and lost races are reported field by field so
//! the user can review the current values and resubmit.

pub mod app;
pub mod config;
pub mod handlers;
pub mod microsvc;
pub mod model;
pub mod school;
pub mod seed;
pub mod telemetry;

pub use app::{service, AppState};
pub use config::{AppConfig, ConfigError};
pub use model::{
    InMemoryModelStore, Model, ModelError, ModelRepository, ModelStore, ModelsExt, TokenError,
    VersionToken, Versioned,
};
pub use school::{
    Department, DepartmentEditor, DepartmentField, DepartmentFields, EditForm, EditOutcome,
    EditRequest, EditResponse, Formatting, Instructor,
};
