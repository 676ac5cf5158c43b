//! Session variables from the request context (forwarded request headers).

use std::collections::HashMap;

const REQUEST_ID: &str = "x-request-id";

/// Variables carried alongside a command, keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Correlation id supplied by the caller (`x-request-id`).
    pub fn request_id(&self) -> Option<&str> {
        self.get(REQUEST_ID)
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }
}
