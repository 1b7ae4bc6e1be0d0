use std::env;

use anyhow::{Context, Result};

/// Startup configuration, read once in `main` and passed into handlers
/// through `HandlerDeps`. There is no ambient global lookup; everything
/// that needs the admin identity receives it from here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram user id of the bot administrator. Exact match only,
    /// there is no admin hierarchy.
    pub bot_admin_id: i64,
    /// Path to the SQLite database file.
    pub database_path: String,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// `BOT_ADMIN_ID` is required; `DATABASE_PATH` defaults to
    /// `doorman.sqlite` in the working directory.
    pub fn from_env() -> Result<Self> {
        let raw = env::var("BOT_ADMIN_ID").context("BOT_ADMIN_ID is not set")?;
        let bot_admin_id = parse_admin_id(&raw)?;
        let database_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "doorman.sqlite".to_string());

        Ok(Self {
            bot_admin_id,
            database_path,
        })
    }
}

fn parse_admin_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("BOT_ADMIN_ID is not a valid integer: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_admin_id() {
        assert_eq!(parse_admin_id("42").unwrap(), 42);
        assert_eq!(parse_admin_id(" 987654321 ").unwrap(), 987654321);
    }

    #[test]
    fn rejects_non_numeric_admin_id() {
        assert!(parse_admin_id("@stan").is_err());
        assert!(parse_admin_id("").is_err());
    }
}
