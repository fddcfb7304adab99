use super::{entity_kind::EntityKind, status::TimerStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Accrual state carried by every timed entity.
///
/// Invariant: `running == last_started_at.is_some() == status.is_running()`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct TimerState {
    pub total_seconds: i64,
    pub running: bool,
    pub last_started_at: Option<DateTime<Utc>>,
    pub status: TimerStatus,
}

impl TimerState {
    pub fn is_consistent(&self) -> bool {
        self.running == self.last_started_at.is_some()
            && self.running == self.status.is_running()
            && self.total_seconds >= 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimedEntity {
    pub id: i64,
    pub tenant: String,         // ⇔ entities.tenant
    pub kind: EntityKind,       // ⇔ entities.kind ('task' | 'timesheet')
    pub title: String,          // ⇔ entities.title
    pub owner_id: i64,          // ⇔ entities.owner_id → users.id
    pub timer: TimerState,      // ⇔ total_seconds, running, last_started_at, status
    pub created_at: String,     // ⇔ entities.created_at (TEXT, ISO8601)
}

impl TimedEntity {
    /// Builds a fresh, never-started entity. `id = 0` until inserted.
    pub fn new(tenant: &str, kind: EntityKind, title: &str, owner_id: i64) -> Self {
        Self {
            id: 0,
            tenant: tenant.to_string(),
            kind,
            title: title.to_string(),
            owner_id,
            timer: TimerState::default(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
