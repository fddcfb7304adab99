use chrono::{DateTime, Utc};
use serde::Serialize;

/// One work interval in the ledger.
///
/// Opened when accrual starts, closed (with `end_time` and `duration`)
/// when accrual pauses or stops.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimesheetEntry {
    pub id: i64,
    pub entity_id: i64,
    pub user_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i64>, // seconds, filled on close
}

impl TimesheetEntry {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}
