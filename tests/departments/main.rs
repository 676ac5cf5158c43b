//! Department edit integration tests.

mod concurrency;
mod edit_flow;
mod support;
