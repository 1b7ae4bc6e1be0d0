//! Per-chat command-menu reconciliation
//!
//! The menu shown next to the input field is recomputed from the role
//! snapshot on every /start and pushed to exactly one chat. The list is
//! ordered: base commands first, premium block, then admin block. The
//! admin block repeats `bugs` on purpose, mirroring the declared admin
//! menu; the Bot API tolerates the duplicate name.

use teloxide::prelude::*;
use teloxide::types::{BotCommand, BotCommandScope, Recipient};

use crate::i18n;
use crate::roles::RoleSnapshot;

/// Builds the ordered command list visible to a role.
///
/// Command identifiers are locale-independent; descriptions are resolved
/// through the role's locale.
pub fn command_menu(role: &RoleSnapshot) -> Vec<BotCommand> {
    let lang = i18n::lang_from_code(&role.locale);

    // Base commands, always present and in this order
    let mut commands = vec![
        BotCommand::new("start", i18n::t(&lang, "cmd.start")),
        BotCommand::new("help", i18n::t(&lang, "cmd.help")),
        BotCommand::new("queue", i18n::t(&lang, "cmd.queue")),
        BotCommand::new("profile", i18n::t(&lang, "cmd.profile")),
        BotCommand::new("bugs", i18n::t(&lang, "cmd.bugs")),
    ];

    if role.is_premium {
        commands.extend([
            BotCommand::new("monitor", i18n::t(&lang, "cmd.monitor")),
            BotCommand::new("unmonitor", i18n::t(&lang, "cmd.unmonitor")),
        ]);
    }

    if role.is_admin {
        commands.extend([
            BotCommand::new("users", i18n::t(&lang, "cmd.users")),
            BotCommand::new("history", i18n::t(&lang, "cmd.history")),
            BotCommand::new("block", i18n::t(&lang, "cmd.block")),
            BotCommand::new("unblock", i18n::t(&lang, "cmd.unblock")),
            BotCommand::new("blocklist", i18n::t(&lang, "cmd.blocklist")),
            BotCommand::new("status", i18n::t(&lang, "cmd.status")),
            BotCommand::new("restart", i18n::t(&lang, "cmd.restart")),
            BotCommand::new("bugreport", i18n::t(&lang, "cmd.listbugs")),
            BotCommand::new("bugs", i18n::t(&lang, "cmd.bugs")),
            BotCommand::new("reset_auth", "Reset Telegram auth code"),
            BotCommand::new("flush", i18n::t(&lang, "cmd.flush")),
            BotCommand::new("welcome", i18n::t(&lang, "cmd.welcome")),
        ]);
    }

    commands
}

/// Pushes the role-appropriate command menu, scoped to a single chat.
///
/// Menu staleness is non-fatal: a failed push is logged and the menu
/// self-heals on the next /start.
pub async fn sync_chat_commands(bot: &Bot, chat_id: ChatId, role: &RoleSnapshot) {
    log::debug!(
        "Updating commands for chat {}, is_admin: {}, is_premium: {}",
        chat_id,
        role.is_admin,
        role.is_premium
    );

    let result = bot
        .set_my_commands(command_menu(role))
        .scope(BotCommandScope::Chat {
            chat_id: Recipient::Id(chat_id),
        })
        .await;

    match result {
        Ok(_) => log::debug!("Commands updated for chat {}", chat_id),
        Err(e) => log::error!("Failed to update commands for chat {}: {}", chat_id, e),
    }
}
