use crate::errors::{AppError, AppResult};
use crate::models::entity_kind::EntityKind;
use crate::models::status::TimerStatus;
use crate::models::timed_entity::{TimedEntity, TimerState};
use crate::models::timesheet_entry::TimesheetEntry;
use crate::models::user::User;
use crate::utils::time::{format_ts, parse_ts};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn get_ts(row: &Row, name: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(name)?;
    parse_ts(&raw).ok_or_else(|| conversion_error(0, AppError::InvalidTime(raw.clone())))
}

fn get_opt_ts(row: &Row, name: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(name)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_ts(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(0, AppError::InvalidTime(s.clone()))),
    }
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

pub fn map_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        tenant: row.get("tenant")?,
        name: row.get("name")?,
        last_seen: get_opt_ts(row, "last_seen")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_user(conn: &Connection, tenant: &str, name: &str) -> AppResult<User> {
    let created_at = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO users (tenant, name, created_at) VALUES (?1, ?2, ?3)",
        params![tenant, name, created_at],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        tenant: tenant.to_string(),
        name: name.to_string(),
        last_seen: None,
        created_at,
    })
}

pub fn load_user(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let user = conn
        .query_row("SELECT * FROM users WHERE id = ?1", [id], map_user)
        .optional()?;
    Ok(user)
}

pub fn require_user(conn: &Connection, id: i64) -> AppResult<User> {
    load_user(conn, id)?.ok_or(AppError::NotFound { kind: "User", id })
}

pub fn list_users(conn: &Connection, tenant: Option<&str>) -> AppResult<Vec<User>> {
    let mut out = Vec::new();

    match tenant {
        Some(t) => {
            let mut stmt =
                conn.prepare("SELECT * FROM users WHERE tenant = ?1 ORDER BY id ASC")?;
            for r in stmt.query_map([t], map_user)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM users ORDER BY tenant ASC, id ASC")?;
            for r in stmt.query_map([], map_user)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Stamp `users.last_seen`. Returns false when the user does not exist.
pub fn set_last_seen(conn: &Connection, user_id: i64, at: &DateTime<Utc>) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE users SET last_seen = ?1 WHERE id = ?2",
        params![format_ts(at), user_id],
    )?;
    Ok(n > 0)
}

// ---------------------------------------------------------------------------
// entities
// ---------------------------------------------------------------------------

pub fn map_entity(row: &Row) -> Result<TimedEntity> {
    let kind_str: String = row.get("kind")?;
    let kind = EntityKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidKind(kind_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = TimerStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            0,
            AppError::Other(format!("Invalid timer status: {}", status_str)),
        )
    })?;

    Ok(TimedEntity {
        id: row.get("id")?,
        tenant: row.get("tenant")?,
        kind,
        title: row.get("title")?,
        owner_id: row.get("owner_id")?,
        timer: TimerState {
            total_seconds: row.get("total_seconds")?,
            running: row.get::<_, i32>("running")? == 1,
            last_started_at: get_opt_ts(row, "last_started_at")?,
            status,
        },
        created_at: row.get("created_at")?,
    })
}

pub fn insert_entity(conn: &Connection, e: &TimedEntity) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entities (tenant, kind, title, owner_id, total_seconds, running,
                               last_started_at, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            e.tenant,
            e.kind.to_db_str(),
            e.title,
            e.owner_id,
            e.timer.total_seconds,
            if e.timer.running { 1 } else { 0 },
            e.timer.last_started_at.as_ref().map(format_ts),
            e.timer.status.to_db_str(),
            e.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_entity(conn: &Connection, id: i64) -> AppResult<Option<TimedEntity>> {
    let entity = conn
        .query_row("SELECT * FROM entities WHERE id = ?1", [id], map_entity)
        .optional()?;
    Ok(entity)
}

pub fn list_entities(
    conn: &Connection,
    tenant: &str,
    running_only: bool,
) -> AppResult<Vec<TimedEntity>> {
    let sql = if running_only {
        "SELECT * FROM entities WHERE tenant = ?1 AND running = 1 ORDER BY id ASC"
    } else {
        "SELECT * FROM entities WHERE tenant = ?1 ORDER BY id ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([tenant], map_entity)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Persist the timer columns of one entity.
pub fn update_timer(conn: &Connection, entity_id: i64, state: &TimerState) -> AppResult<()> {
    conn.execute(
        "UPDATE entities
         SET total_seconds = ?1, running = ?2, last_started_at = ?3, status = ?4
         WHERE id = ?5",
        params![
            state.total_seconds,
            if state.running { 1 } else { 0 },
            state.last_started_at.as_ref().map(format_ts),
            state.status.to_db_str(),
            entity_id,
        ],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// timesheet entries
// ---------------------------------------------------------------------------

pub fn map_entry(row: &Row) -> Result<TimesheetEntry> {
    Ok(TimesheetEntry {
        id: row.get("id")?,
        entity_id: row.get("entity_id")?,
        user_id: row.get("user_id")?,
        start_time: get_ts(row, "start_time")?,
        end_time: get_opt_ts(row, "end_time")?,
        duration: row.get("duration")?,
    })
}

pub fn find_open_entry(
    conn: &Connection,
    entity_id: i64,
    user_id: i64,
) -> AppResult<Option<TimesheetEntry>> {
    let entry = conn
        .query_row(
            "SELECT * FROM timesheet_entries
             WHERE entity_id = ?1 AND user_id = ?2 AND end_time IS NULL
             ORDER BY start_time DESC
             LIMIT 1",
            params![entity_id, user_id],
            map_entry,
        )
        .optional()?;
    Ok(entry)
}

pub fn open_entry(
    conn: &Connection,
    entity_id: i64,
    user_id: i64,
    start: &DateTime<Utc>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timesheet_entries (entity_id, user_id, start_time)
         VALUES (?1, ?2, ?3)",
        params![entity_id, user_id, format_ts(start)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn close_entry(
    conn: &Connection,
    entry_id: i64,
    end: &DateTime<Utc>,
    duration: i64,
) -> AppResult<()> {
    conn.execute(
        "UPDATE timesheet_entries SET end_time = ?1, duration = ?2 WHERE id = ?3",
        params![format_ts(end), duration, entry_id],
    )?;
    Ok(())
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<TimesheetEntry>> {
    let entry = conn
        .query_row(
            "SELECT * FROM timesheet_entries WHERE id = ?1",
            [id],
            map_entry,
        )
        .optional()?;
    Ok(entry)
}

pub fn load_entries(conn: &Connection, entity_id: i64) -> AppResult<Vec<TimesheetEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM timesheet_entries
         WHERE entity_id = ?1
         ORDER BY start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map([entity_id], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
