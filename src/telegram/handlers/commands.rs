//! Command handler implementations (/start, /help) and group catch-alls

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, Message, ParseMode};

use super::identity::sync_identity;
use super::types::{HandlerDeps, HandlerError};
use crate::i18n;
use crate::roles::classify;
use crate::telegram::commands::sync_chat_commands;

/// Handle /start command
///
/// Order matters: identity persistence completes (or swallows its own
/// failure) before the welcome reply, and the menu reconciliation runs
/// last with the freshly classified role.
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(sender) = msg.from.as_ref() else {
        return Ok(());
    };

    let role = classify(Some(sender), deps.config.bot_admin_id);
    sync_identity(&deps.db_pool, msg, sender);

    let lang = i18n::lang_from_code(&role.locale);
    bot.send_message(msg.chat.id, i18n::t(&lang, "start.instructions"))
        .parse_mode(ParseMode::Markdown)
        .link_preview_options(disabled_link_preview())
        .await?;

    sync_chat_commands(bot, msg.chat.id, &role).await;

    Ok(())
}

/// Handle /help command
///
/// The help text is role-dependent: header and general section always,
/// premium and admin sections only for roles that can use them.
pub(super) async fn handle_help_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(sender) = msg.from.as_ref() else {
        return Ok(());
    };

    let role = classify(Some(sender), deps.config.bot_admin_id);
    let lang = i18n::lang_from_code(&role.locale);

    let mut help_text = i18n::t(&lang, "help.header");
    help_text.push_str("\n\n");

    let mut general = FluentArgs::new();
    general.set("cmdStart", i18n::t(&lang, "cmd.start"));
    general.set("cmdHelp", i18n::t(&lang, "cmd.help"));
    general.set("cmdQueue", i18n::t(&lang, "cmd.queue"));
    general.set("cmdProfile", i18n::t(&lang, "cmd.profile"));
    general.set("cmdBugs", i18n::t(&lang, "cmd.bugs"));
    help_text.push_str(&i18n::t_args(&lang, "help.general", &general));

    if role.is_premium {
        let mut premium = FluentArgs::new();
        premium.set("cmdMonitor", i18n::t(&lang, "cmd.monitor"));
        premium.set("cmdUnmonitor", i18n::t(&lang, "cmd.unmonitor"));
        help_text.push('\n');
        help_text.push_str(&i18n::t_args(&lang, "help.premium", &premium));
    }

    if role.is_admin {
        let mut admin = FluentArgs::new();
        admin.set("cmdUsers", i18n::t(&lang, "cmd.users"));
        admin.set("cmdHistory", i18n::t(&lang, "cmd.history"));
        admin.set("cmdBlock", i18n::t(&lang, "cmd.block"));
        admin.set("cmdUnblock", i18n::t(&lang, "cmd.unblock"));
        admin.set("cmdBlocklist", i18n::t(&lang, "cmd.blocklist"));
        admin.set("cmdRestart", i18n::t(&lang, "cmd.restart"));
        admin.set("cmdStatus", i18n::t(&lang, "cmd.status"));
        admin.set("cmdListbugs", i18n::t(&lang, "cmd.listbugs"));
        help_text.push('\n');
        help_text.push_str(&i18n::t_args(&lang, "help.admin", &admin));
    }

    bot.send_message(msg.chat.id, help_text)
        .parse_mode(ParseMode::Markdown)
        .await?;

    Ok(())
}

/// Catch-all for messages no specific matcher claimed.
///
/// The placeholder literal identifies which group answered; scaffolding
/// for incremental rollout of the remaining commands.
pub(super) async fn handle_not_implemented(bot: &Bot, msg: &Message, placeholder: &str) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, placeholder).await?;
    Ok(())
}

fn disabled_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}
