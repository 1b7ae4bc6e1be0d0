//! Telegram bot integration: bot creation, router groups, and the
//! per-chat command-menu reconciler.

pub mod bot;
pub mod commands;
pub mod handlers;

// Re-exports for convenience
pub use bot::{create_bot, Command};
pub use commands::{command_menu, sync_chat_commands};
pub use handlers::{router_groups, schema, schema_with_groups, HandlerDeps, HandlerError};
