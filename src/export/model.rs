// src/export/model.rs

use serde::Serialize;

/// Flat ledger row for CSV / JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub entry_id: i64,
    pub entity_id: i64,
    pub kind: String,
    pub title: String,
    pub user_id: i64,
    pub user_name: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub duration: Option<i64>,
}
