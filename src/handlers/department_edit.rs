//! Handler: department.edit
//!
//! Posts the edit form. Conflicts, deletions and invalid input come back as
//! a 200 response tagged by `outcome` so the form can be drawn again.

use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::microsvc::{Context, HandlerError};
use crate::model::ModelStore;
use crate::school::EditForm;

pub const COMMAND: &str = "department.edit";

#[derive(Deserialize)]
pub struct Input {
    #[serde(default)]
    pub id: Option<i32>,
    pub department: EditForm,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.has_field("department")
}

pub fn handle<S: ModelStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let response = ctx.state().editor().submit(input.id, &input.department)?;
    Ok(serde_json::to_value(response)?)
}
