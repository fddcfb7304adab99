use crate::db::queries::set_last_seen;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::sync::Mutex;

use super::registry::UserId;

/// Persists the "last seen" instant of a user when they go offline.
pub trait LastSeenStore: Send + Sync {
    fn stamp_last_seen(&self, user: UserId, at: DateTime<Utc>) -> AppResult<()>;
}

/// `users.last_seen` column of the SQLite store.
pub struct SqliteLastSeen {
    conn: Mutex<Connection>,
}

impl SqliteLastSeen {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::new(Connection::open(path)?))
    }
}

impl LastSeenStore for SqliteLastSeen {
    fn stamp_last_seen(&self, user: UserId, at: DateTime<Utc>) -> AppResult<()> {
        let conn = match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // unknown users are not an error: the socket may outlive the account
        set_last_seen(&conn, user, &at)?;
        Ok(())
    }
}
