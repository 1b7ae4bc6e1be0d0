//! SQLite-backed persistence for chat and user identity records

pub mod db;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool, StorageError};
