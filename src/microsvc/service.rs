//! Command handler registry and dispatch for microsvc.
//!
//! `Service<R>` holds the application state and a set of named command
//! handlers. Each handler receives a `Context<R>` and returns
//! `Result<Value, HandlerError>`.
//!
//! ## Example
//!
//! ```ignore
//! use campus_records::microsvc::{Service, Session};
//! use serde_json::json;
//!
//! let service = Service::new(state).command_guarded(
//!     "department.get",
//!     |ctx| ctx.raw_input().is_object(),
//!     |ctx| {
//!         let input = ctx.input::<GetInput>()?;
//!         Ok(json!({ "id": input.id }))
//!     },
//! );
//!
//! let result = service.dispatch("department.get", json!({ "id": 1 }), Session::new());
//! ```

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

type Guard<R> = Box<dyn Fn(&Context<R>) -> bool + Send + Sync>;
type Handle<R> = Box<dyn Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<R> {
    guard: Option<Guard<R>>,
    handle: Handle<R>,
}

/// A service that routes commands to handler functions.
///
/// Generic over `R`, the state handlers reach through `ctx.state()`.
pub struct Service<R> {
    state: R,
    handlers: HashMap<String, CommandHandler<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(state: R) -> Self {
        Self {
            state,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    ///
    /// Opens a span tagged with the session's request id, looks up the handler,
    /// runs the guard (if any), then calls the handler.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let span = tracing::info_span!(
            "dispatch",
            command,
            request_id = session.request_id().unwrap_or("-")
        );
        let _entered = span.enter();

        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(input, &self.state);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                debug!("guard rejected input");
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        let result = (handler.handle)(&ctx);
        if let Err(e) = &result {
            warn!(status = e.status_code(), error = %e, "command failed");
        }
        result
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn state(&self) -> &R {
        &self.state
    }
}
