//! Handler: department.list

use serde_json::{json, Value};

use crate::app::AppState;
use crate::microsvc::{Context, HandlerError};
use crate::model::ModelStore;
use crate::school::list_departments;

pub const COMMAND: &str = "department.list";

pub fn guard<R>(_ctx: &Context<R>) -> bool {
    true
}

pub fn handle<S: ModelStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
    let state = ctx.state();
    let departments = list_departments(state.store(), state.formatting())?;
    Ok(json!({ "departments": departments }))
}
