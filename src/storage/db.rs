use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Result};
use strum::{Display, EnumString};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Error covering one identity-persistence unit of work: acquiring the
/// pooled session plus the statements executed inside it.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Kind of a Telegram chat, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Identity of a chat the bot was started in. Written once per chat id;
/// later saves for the same id are no-ops (first-write-wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub id: i64,
    pub kind: ChatType,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_forum: bool,
    pub created_at: DateTime<Utc>,
}

/// Identity of a user, upserted on every /start. `username` and
/// `is_premium` are last-write-wins; `is_bot` keeps its first value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub chat_id: i64,
    pub username: String,
    pub is_bot: bool,
    pub is_premium: bool,
}

/// Create a new database connection pool
///
/// Initializes a connection pool with up to 10 connections and runs schema
/// migrations on the first connection.
pub fn create_pool(database_path: &str) -> std::result::Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder().max_size(10).build(manager)?;

    // Ensure schema is up to date on first connection
    let conn = pool.get()?;
    if let Err(e) = migrate_schema(&conn) {
        log::warn!("Failed to migrate schema: {}", e);
    }

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is automatically returned to the pool when dropped,
/// which is what scopes one identity-sync session.
pub fn get_connection(pool: &DbPool) -> std::result::Result<DbConnection, r2d2::Error> {
    pool.get()
}

fn migrate_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS chats (
            id INTEGER PRIMARY KEY,
            type TEXT NOT NULL,
            title TEXT,
            username TEXT,
            first_name TEXT,
            last_name TEXT,
            is_forum INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            chat_id INTEGER PRIMARY KEY,
            username TEXT NOT NULL DEFAULT '',
            is_bot INTEGER NOT NULL DEFAULT 0,
            is_premium INTEGER NOT NULL DEFAULT 0
        );",
    )?;
    Ok(())
}

/// Creates the chat record if no record exists for its id.
///
/// Returns `Ok(true)` when a row was inserted, `Ok(false)` when a record
/// for that chat id already existed (the call is then a no-op, not an
/// error).
pub fn create_chat_if_absent(conn: &Connection, chat: &ChatRecord) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO chats (id, type, title, username, first_name, last_name, is_forum, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            chat.id,
            chat.kind.to_string(),
            chat.title,
            chat.username,
            chat.first_name,
            chat.last_name,
            chat.is_forum,
            chat.created_at.to_rfc3339(),
        ],
    )?;
    Ok(inserted > 0)
}

/// Creates or refreshes the user record keyed by the user's own id.
///
/// Repeated saves with the same identity converge to the same stored
/// state.
pub fn upsert_user(conn: &Connection, user: &UserRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO users (chat_id, username, is_bot, is_premium)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(chat_id) DO UPDATE SET
            username = excluded.username,
            is_premium = excluded.is_premium",
        params![user.chat_id, user.username, user.is_bot, user.is_premium],
    )?;
    Ok(())
}

/// Fetches a user record, if present.
pub fn get_user(conn: &Connection, chat_id: i64) -> Result<Option<UserRecord>> {
    conn.query_row(
        "SELECT chat_id, username, is_bot, is_premium FROM users WHERE chat_id = ?1",
        params![chat_id],
        |row| {
            Ok(UserRecord {
                chat_id: row.get(0)?,
                username: row.get(1)?,
                is_bot: row.get(2)?,
                is_premium: row.get(3)?,
            })
        },
    )
    .optional()
}

/// Fetches a chat record, if present.
pub fn get_chat(conn: &Connection, id: i64) -> Result<Option<ChatRecord>> {
    conn.query_row(
        "SELECT id, type, title, username, first_name, last_name, is_forum, created_at
         FROM chats WHERE id = ?1",
        params![id],
        |row| {
            let kind: String = row.get(1)?;
            let created_at: String = row.get(7)?;
            Ok(ChatRecord {
                id: row.get(0)?,
                kind: kind.parse().unwrap_or(ChatType::Private),
                title: row.get(2)?,
                username: row.get(3)?,
                first_name: row.get(4)?,
                last_name: row.get(5)?,
                is_forum: row.get(6)?,
                created_at: DateTime::parse_from_rfc3339(&created_at)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or(DateTime::UNIX_EPOCH),
            })
        },
    )
    .optional()
}

/// Number of chat records stored for an id. Used to assert the
/// create-if-absent invariant in tests.
pub fn count_chats(conn: &Connection, id: i64) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM chats WHERE id = ?1", params![id], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrate_schema(&conn).unwrap();
        conn
    }

    fn chat(id: i64, title: &str) -> ChatRecord {
        ChatRecord {
            id,
            kind: ChatType::Private,
            title: Some(title.to_string()),
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
            is_forum: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn chat_create_is_first_write_wins() {
        let conn = test_conn();

        assert!(create_chat_if_absent(&conn, &chat(100, "first")).unwrap());
        assert!(!create_chat_if_absent(&conn, &chat(100, "second")).unwrap());

        assert_eq!(count_chats(&conn, 100).unwrap(), 1);
        let stored = get_chat(&conn, 100).unwrap().unwrap();
        assert_eq!(stored.title.as_deref(), Some("first"));
    }

    #[test]
    fn chat_type_round_trips_as_text() {
        let conn = test_conn();
        let mut rec = chat(200, "group chat");
        rec.kind = ChatType::Supergroup;
        rec.is_forum = true;
        create_chat_if_absent(&conn, &rec).unwrap();

        let stored = get_chat(&conn, 200).unwrap().unwrap();
        assert_eq!(stored.kind, ChatType::Supergroup);
        assert!(stored.is_forum);
    }

    #[test]
    fn user_upsert_converges_to_last_write() {
        let conn = test_conn();

        for (name, premium) in [("old_name", false), ("old_name", true), ("new_name", true)] {
            upsert_user(
                &conn,
                &UserRecord {
                    chat_id: 7,
                    username: name.to_string(),
                    is_bot: false,
                    is_premium: premium,
                },
            )
            .unwrap();
        }

        let stored = get_user(&conn, 7).unwrap().unwrap();
        assert_eq!(stored.username, "new_name");
        assert!(stored.is_premium);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users WHERE chat_id = 7", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_records_read_as_none() {
        let conn = test_conn();
        assert!(get_user(&conn, 1).unwrap().is_none());
        assert!(get_chat(&conn, 1).unwrap().is_none());
    }
}
