//! Identity synchronizer
//!
//! On every /start the chat and user identity records are refreshed in
//! storage: create-if-absent for the chat, upsert for the user. Both
//! statements run on one pooled connection, which is released when it
//! drops — on the error path exactly as on the success path.
//!
//! Persistence here is best-effort relative to user-facing
//! responsiveness: failures are logged with the user id and swallowed,
//! so the welcome reply and menu update still happen when the database
//! is down.

use chrono::Utc;
use teloxide::types::{Chat, ChatKind, Message, PublicChatKind, User};

use crate::storage::db::{self, ChatRecord, ChatType, UserRecord};
use crate::storage::{get_connection, DbPool, StorageError};

/// Ensures the chat and user records for this message exist and are
/// fresh. Never fails; see the module docs.
pub fn sync_identity(db_pool: &DbPool, msg: &Message, sender: &User) {
    let (chat, user) = identity_records(msg, sender);
    let user_id = user.chat_id;

    match persist_identity(db_pool, &chat, &user) {
        Ok(()) => log::debug!("User {} started the bot", user_id),
        Err(e) => log::error!("Failed to save user {} on /start: {}", user_id, e),
    }
}

fn persist_identity(db_pool: &DbPool, chat: &ChatRecord, user: &UserRecord) -> Result<(), StorageError> {
    let conn = get_connection(db_pool)?;
    db::create_chat_if_absent(&conn, chat)?;
    db::upsert_user(&conn, user)?;
    Ok(())
}

/// Builds the storage records for a message's chat and sender.
pub fn identity_records(msg: &Message, sender: &User) -> (ChatRecord, UserRecord) {
    let chat = &msg.chat;

    let chat_record = ChatRecord {
        id: chat.id.0,
        kind: chat_type(chat),
        title: chat.title().map(str::to_owned),
        username: chat.username().map(str::to_owned),
        first_name: chat.first_name().map(str::to_owned),
        last_name: chat.last_name().map(str::to_owned),
        is_forum: is_forum(chat),
        created_at: Utc::now(),
    };

    let user_record = UserRecord {
        chat_id: i64::try_from(sender.id.0).ok().unwrap_or(0),
        username: sender.username.clone().unwrap_or_default(),
        is_bot: sender.is_bot,
        is_premium: sender.is_premium,
    };

    (chat_record, user_record)
}

fn chat_type(chat: &Chat) -> ChatType {
    if chat.is_group() {
        ChatType::Group
    } else if chat.is_supergroup() {
        ChatType::Supergroup
    } else if chat.is_channel() {
        ChatType::Channel
    } else {
        ChatType::Private
    }
}

fn is_forum(chat: &Chat) -> bool {
    match &chat.kind {
        ChatKind::Public(public) => match &public.kind {
            PublicChatKind::Supergroup(group) => group.is_forum,
            _ => false,
        },
        ChatKind::Private(_) => false,
    }
}
