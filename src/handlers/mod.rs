//! Command handlers, one module per command.

pub mod department_edit;
pub mod department_get;
pub mod department_list;
pub mod instructor_list;
