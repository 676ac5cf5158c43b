//! Handler: department.get
//!
//! Loads a department for the edit form. A missing id is a not-found.

use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::microsvc::{Context, HandlerError};
use crate::model::ModelStore;

pub const COMMAND: &str = "department.get";

#[derive(Deserialize)]
pub struct Input {
    #[serde(default)]
    pub id: Option<i32>,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.raw_input().is_object()
}

pub fn handle<S: ModelStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let view = ctx.state().editor().load(input.id)?;
    Ok(serde_json::to_value(view)?)
}
