//! Application state and the command service built over it.

use crate::handlers;
use crate::microsvc::Service;
use crate::model::ModelStore;
use crate::school::{DepartmentEditor, Formatting};

/// State shared by every command handler.
pub struct AppState<S> {
    store: S,
    formatting: Formatting,
}

impl<S: ModelStore> AppState<S> {
    pub fn new(store: S, formatting: Formatting) -> Self {
        Self { store, formatting }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    pub fn editor(&self) -> DepartmentEditor<'_, S> {
        DepartmentEditor::new(&self.store, &self.formatting)
    }
}

/// Build the records service with every command registered.
pub fn service<S: ModelStore + 'static>(state: AppState<S>) -> Service<AppState<S>> {
    crate::register_handlers!(
        Service::new(state),
        handlers::department_list,
        handlers::department_get,
        handlers::department_edit,
        handlers::instructor_list,
    )
}
