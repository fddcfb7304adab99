//! Elapsed-time arithmetic shared by the timer transitions, the ledger
//! and every live display.

use crate::models::timed_entity::TimerState;
use chrono::{DateTime, Utc};

/// Whole seconds between `start` and `end`, floored.
/// A negative span (clock skew) counts as zero.
pub fn interval_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 { 0 } else { millis / 1000 }
}

/// Current accrued seconds:
/// `total + floor((now - last_started_at) / 1s)` while running, `total` otherwise.
pub fn elapsed_seconds(
    total_seconds: i64,
    running: bool,
    last_started_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> i64 {
    match (running, last_started_at) {
        (true, Some(started)) => total_seconds + interval_seconds(started, now),
        _ => total_seconds,
    }
}

pub fn elapsed_for(state: &TimerState, now: DateTime<Utc>) -> i64 {
    elapsed_seconds(
        state.total_seconds,
        state.running,
        state.last_started_at,
        now,
    )
}
