//! Doorman - role-gated message routing for a Telegram bot
//!
//! This library contains the bot's routing and access-control core:
//! role classification, capability-filtered router groups, identity
//! persistence, and per-chat command-menu synchronization.
//!
//! # Module Structure
//!
//! - `config`: startup configuration (admin identity, database path)
//! - `roles`: role snapshots and capability filters
//! - `storage`: SQLite pool and chat/user records
//! - `telegram`: bot integration, router groups, and handlers

pub mod config;
pub mod i18n;
pub mod roles;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use config::Config;
pub use roles::{classify, RoleSnapshot};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
pub use telegram::{create_bot, schema, HandlerDeps, HandlerError};
