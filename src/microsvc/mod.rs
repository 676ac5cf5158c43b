//! microsvc: convention-based command handler framework.
//!
//! Register command handlers on a `Service`. Each handler receives a
//! `Context<R>` with access to the input payload, session variables, and
//! the service state.
//!
//! ## Handler Convention
//!
//! Each handler file follows this convention:
//!
//! ```ignore
//! // src/handlers/department_get.rs
//!
//! pub const COMMAND: &str = "department.get";
//!
//! pub fn guard<R>(ctx: &microsvc::Context<R>) -> bool {
//!     ctx.raw_input().is_object()
//! }
//!
//! pub fn handle<S: ModelStore>(
//!     ctx: &microsvc::Context<AppState<S>>,
//! ) -> Result<Value, microsvc::HandlerError> {
//!     // ...
//! }
//! ```

mod context;
mod error;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::Service;
pub use session::Session;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str`, the command name
/// - `guard(ctx) -> bool`, an input shape check
/// - `handle(ctx) -> Result<Value, HandlerError>`, the handler
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
