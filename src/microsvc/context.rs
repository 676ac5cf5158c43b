//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;

/// The raw command payload plus the state the service was built with.
pub struct Context<'a, R> {
    input: Value,
    state: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(input: Value, state: &'a R) -> Self {
        Self { input, state }
    }

    /// Decode the payload into the handler's input type.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        T::deserialize(&self.input).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn state(&self) -> &R {
        self.state
    }

    /// True when the payload is an object with `field` set.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }
}
