//! Router groups and dispatcher schema
//!
//! The bot routes through three named groups, each an independently
//! gated pipeline over the whole message stream: `root` (no gate),
//! `admin` and `premium`. Group evaluation order is the order of the
//! array returned by [`router_groups`] — not implicit framework
//! behavior — and is a tested contract. Every group ends in a
//! catch-all, so under the default order the root catch-all answers
//! anything unmatched; reordering the array changes which catch-all
//! wins, which is exactly what [`schema_with_groups`] exists for.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_help_command, handle_not_implemented, handle_start_command};
use super::middleware::timed;
use super::types::{HandlerDeps, HandlerError};
use crate::roles::{classify, AlwaysAllow, CapabilityFilter, IsAdmin, IsPremium};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and in integration tests.
/// Groups are evaluated in the default order: root, admin, premium.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    schema_with_groups(router_groups(deps))
}

/// Folds named router groups into one dispatch tree. Array order is
/// evaluation order: the first group whose gate passes and whose
/// handler list claims the message answers it.
pub fn schema_with_groups(groups: Vec<(&'static str, UpdateHandler<HandlerError>)>) -> UpdateHandler<HandlerError> {
    groups
        .into_iter()
        .fold(dptree::entry(), |tree, (_, group)| tree.branch(group))
}

/// The router groups in their default evaluation order.
pub fn router_groups(deps: HandlerDeps) -> Vec<(&'static str, UpdateHandler<HandlerError>)> {
    vec![
        ("root", root_group(deps.clone())),
        ("admin", admin_group(deps.clone())),
        ("premium", premium_group(deps)),
    ]
}

/// Adapts a capability filter into a dptree message predicate. The
/// sender role is classified per message, per group.
fn gate<F>(filter: F, admin_id: i64) -> impl Fn(Message) -> bool + Clone + Send + Sync + 'static
where
    F: CapabilityFilter + 'static,
{
    let filter = Arc::new(filter);
    move |msg: Message| filter.allows(&classify(msg.from.as_ref(), admin_id))
}

/// Ungated group carrying the command handlers. The timing middleware
/// wraps every handler in this group, catch-all included.
fn root_group(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let admin_id = deps.config.bot_admin_id;

    Update::filter_message()
        .filter(gate(AlwaysAllow, admin_id))
        .branch(dptree::entry().filter_command::<Command>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let deps = deps.clone();
                async move {
                    log::debug!("Received command: {:?} from chat {}", cmd, msg.chat.id);
                    match cmd {
                        Command::Start => timed("start", handle_start_command(&bot, &msg, &deps)).await,
                        Command::Help => timed("help", handle_help_command(&bot, &msg, &deps)).await,
                    }
                }
            },
        ))
        .branch(dptree::entry().endpoint(|bot: Bot, msg: Message| async move {
            timed("fallback", handle_not_implemented(&bot, &msg, "User Not implemented!!!")).await
        }))
}

/// Gated on the configured admin identity; catch-all only for now.
fn admin_group(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(gate(IsAdmin, deps.config.bot_admin_id))
        .endpoint(|bot: Bot, msg: Message| async move {
            handle_not_implemented(&bot, &msg, "Admin Not implemented!!!").await
        })
}

/// Gated on the sender's premium flag; catch-all only for now.
fn premium_group(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(gate(IsPremium, deps.config.bot_admin_id))
        .endpoint(|bot: Bot, msg: Message| async move {
            handle_not_implemented(&bot, &msg, "Premium Not implemented!!!").await
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_group_order_is_root_admin_premium() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sqlite");
        let deps = HandlerDeps::new(
            Arc::new(crate::storage::create_pool(path.to_str().unwrap()).unwrap()),
            Arc::new(crate::config::Config {
                bot_admin_id: 1,
                database_path: path.to_string_lossy().into_owned(),
            }),
        );

        let names: Vec<&str> = router_groups(deps).into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["root", "admin", "premium"]);
    }
}
