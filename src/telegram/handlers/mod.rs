//! Telegram bot handler tree configuration
//!
//! This module provides the router groups and dispatcher schema for the
//! bot. The handlers are organized in a testable way, allowing
//! integration tests to use the same handler tree as production code.

mod commands;
mod identity;
mod middleware;
mod schema;
mod types;

pub use identity::sync_identity;
pub use schema::{router_groups, schema, schema_with_groups};
pub use types::{HandlerDeps, HandlerError};
