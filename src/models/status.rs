use serde::Serialize;

/// Lifecycle of a timed entity.
///
/// `Running` is the only state in which time accrues; every other state
/// has `last_started_at == None`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Pending,
    Running,
    Paused,
    Stopped,
}

impl TimerStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimerStatus::Pending => "pending",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Stopped => "stopped",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TimerStatus::Pending),
            "running" => Some(TimerStatus::Running),
            "paused" => Some(TimerStatus::Paused),
            "stopped" => Some(TimerStatus::Stopped),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerStatus::Running)
    }
}
