//! Bot instance creation and command definitions

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// Commands with dedicated handlers in the root group. Everything else,
/// including the base-menu commands without business logic yet, falls
/// through to the group catch-all.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "restart the bot")]
    Start,
    #[command(description = "show available commands")]
    Help,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, missing token)
pub fn create_bot() -> anyhow::Result<Bot> {
    let bot = Bot::from_env();

    // Check if local Bot API server is configured
    if let Ok(bot_api_url) = std::env::var("BOT_API_URL") {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        return Ok(bot.set_api_url(url));
    }

    Ok(bot)
}
