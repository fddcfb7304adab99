use serde::Serialize;

/// What a timed row represents: a task on a board or a row of a timesheet.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Task,
    Timesheet,
}

impl EntityKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntityKind::Task => "task",
            EntityKind::Timesheet => "timesheet",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "task" => Some(EntityKind::Task),
            "timesheet" => Some(EntityKind::Timesheet),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Task => "Task",
            EntityKind::Timesheet => "Timesheet",
        }
    }
}
