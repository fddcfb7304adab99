/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

use crate::models::status::TimerStatus;

/// Status color:
/// running → green
/// paused → yellow
/// stopped → red
/// pending → grey
pub fn color_for_status(status: TimerStatus) -> &'static str {
    match status {
        TimerStatus::Running => GREEN,
        TimerStatus::Paused => YELLOW,
        TimerStatus::Stopped => RED,
        TimerStatus::Pending => GREY,
    }
}

pub fn colorize_status(status: TimerStatus) -> String {
    format!(
        "{}{}{}",
        color_for_status(status),
        status.to_db_str(),
        RESET
    )
}
