use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use doorman::storage::create_pool;
use doorman::telegram::{create_bot, schema, HandlerDeps};
use doorman::Config;

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (configuration, database,
/// bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before the
    // logger and config read them
    let _ = dotenv();
    pretty_env_logger::init();

    let config = Arc::new(Config::from_env()?);
    let db_pool = Arc::new(create_pool(&config.database_path)?);
    let bot = create_bot()?;

    log::info!(
        "Starting doorman (admin id: {}, database: {})",
        config.bot_admin_id,
        config.database_path
    );

    Dispatcher::builder(bot, schema(HandlerDeps::new(db_pool, config)))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
