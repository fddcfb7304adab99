use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    message: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_users",
        message: "Created users table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                tenant      TEXT NOT NULL,
                name        TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                UNIQUE(tenant, name)
            );
        "#,
    },
    Migration {
        version: "20250301_0002_create_entities",
        message: "Created entities table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS entities (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                tenant           TEXT NOT NULL,
                kind             TEXT NOT NULL CHECK(kind IN ('task','timesheet')),
                title            TEXT NOT NULL,
                owner_id         INTEGER NOT NULL REFERENCES users(id),
                total_seconds    INTEGER NOT NULL DEFAULT 0 CHECK(total_seconds >= 0),
                running          INTEGER NOT NULL DEFAULT 0,
                last_started_at  TEXT,
                status           TEXT NOT NULL DEFAULT 'pending'
                                 CHECK(status IN ('pending','running','paused','stopped')),
                created_at       TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_entities_tenant ON entities(tenant);
            CREATE INDEX IF NOT EXISTS idx_entities_owner ON entities(owner_id);
        "#,
    },
    Migration {
        version: "20250301_0003_create_timesheet_entries",
        message: "Created timesheet_entries table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS timesheet_entries (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                entity_id   INTEGER NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
                user_id     INTEGER NOT NULL REFERENCES users(id),
                start_time  TEXT NOT NULL,
                end_time    TEXT,
                duration    INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_entries_entity_start
                ON timesheet_entries(entity_id, start_time);
        "#,
    },
    Migration {
        version: "20250412_0004_add_users_last_seen",
        message: "Added last_seen to users",
        sql: "ALTER TABLE users ADD COLUMN last_seen TEXT;",
    },
    Migration {
        version: "20250412_0005_single_open_entry",
        message: "At most one open timesheet entry per entity and user",
        sql: r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_entries_one_open
                ON timesheet_entries(entity_id, user_id)
                WHERE end_time IS NULL;
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.message],
    )?;

    tx.commit()?;
    Ok(())
}

/// Names of migrations not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(). Safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.message));
    }

    Ok(())
}
