//! Handler: instructor.list

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::microsvc::{Context, HandlerError};
use crate::model::ModelStore;
use crate::school::InstructorDirectory;

pub const COMMAND: &str = "instructor.list";

#[derive(Deserialize, Default)]
pub struct Input {
    #[serde(default)]
    pub selected: Option<i32>,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.raw_input().is_object()
}

pub fn handle<S: ModelStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let choices = ctx.state().store().administrator_choices(input.selected)?;
    Ok(json!({ "instructors": choices }))
}
