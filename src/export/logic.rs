// src/export/logic.rs

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entity, require_user};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::ui::messages::warning;
use rusqlite::{Row, params};
use std::path::Path;

/// High-level export of the timesheet ledger.
pub struct ExportLogic;

impl ExportLogic {
    /// Export ledger rows of the acting user's tenant.
    ///
    /// - `file`: absolute path of the output file
    /// - `entity`: restrict to one entity of that tenant
    ///
    /// Returns the number of exported rows.
    pub fn export(
        pool: &mut DbPool,
        acting_user: i64,
        format: ExportFormat,
        file: &str,
        entity: Option<i64>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let actor = require_user(&pool.conn, acting_user)?;

        if let Some(id) = entity {
            let e = load_entity(&pool.conn, id)?.ok_or(AppError::NotFound { kind: "Entity", id })?;
            if e.tenant != actor.tenant {
                return Err(AppError::Unauthorized {
                    kind: e.kind.label(),
                    id,
                    user: actor.id,
                });
            }
        }

        let rows = load_rows(pool, &actor.tenant, entity)?;

        if rows.is_empty() {
            warning("No ledger entries found for the selected scope.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} rows as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}

fn load_rows(pool: &mut DbPool, tenant: &str, entity: Option<i64>) -> AppResult<Vec<EntryExport>> {
    let mut stmt = pool.conn.prepare(
        "SELECT t.id, t.entity_id, e.kind, e.title, t.user_id, u.name,
                t.start_time, t.end_time, t.duration
         FROM timesheet_entries t
         JOIN entities e ON e.id = t.entity_id
         JOIN users u ON u.id = t.user_id
         WHERE e.tenant = ?1 AND (?2 IS NULL OR t.entity_id = ?2)
         ORDER BY t.start_time ASC, t.id ASC",
    )?;

    let rows = stmt.query_map(params![tenant, entity], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Mapping DB → EntryExport.
fn map_row(row: &Row<'_>) -> rusqlite::Result<EntryExport> {
    Ok(EntryExport {
        entry_id: row.get(0)?,
        entity_id: row.get(1)?,
        kind: row.get(2)?,
        title: row.get(3)?,
        user_id: row.get(4)?,
        user_name: row.get(5)?,
        start_time: row.get(6)?,
        end_time: row.get(7)?,
        duration: row.get(8)?,
    })
}
