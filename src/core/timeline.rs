use crate::core::timer::calculator::interval_seconds;
use crate::models::timesheet_entry::TimesheetEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One worked interval reconstructed from a ledger entry.
#[derive(Debug, Clone, Serialize)]
pub struct Interval {
    pub entry_id: i64,
    pub user_id: i64,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub seconds: i64,
}

impl Interval {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Pause between two consecutive intervals.
#[derive(Debug, Clone, Serialize)]
pub struct Break {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub seconds: i64,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Timeline {
    pub intervals: Vec<Interval>,
    pub breaks: Vec<Break>,
    pub worked_seconds: i64,
    pub break_seconds: i64,
}

/// Build the work/break timeline of one entity.
///
/// Closed entries use their stored duration; an open entry is measured
/// up to `now`. Breaks are the positive gaps between one interval's end
/// and the next interval's start.
pub fn build_timeline(entries: &[TimesheetEntry], now: DateTime<Utc>) -> Timeline {
    if entries.is_empty() {
        return Timeline::default();
    }

    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| (e.start_time, e.id));

    let intervals: Vec<Interval> = sorted
        .iter()
        .map(|e| Interval {
            entry_id: e.id,
            user_id: e.user_id,
            start: e.start_time,
            end: e.end_time,
            seconds: match (e.end_time, e.duration) {
                (Some(_), Some(d)) => d,
                (Some(end), None) => interval_seconds(e.start_time, end),
                (None, _) => interval_seconds(e.start_time, now),
            },
        })
        .collect();

    let mut breaks = Vec::new();
    for w in intervals.windows(2) {
        if let Some(end) = w[0].end {
            let next = w[1].start;
            if next > end {
                breaks.push(Break {
                    start: end,
                    end: next,
                    seconds: interval_seconds(end, next),
                });
            }
        }
    }

    Timeline {
        worked_seconds: intervals.iter().map(|i| i.seconds).sum(),
        break_seconds: breaks.iter().map(|b| b.seconds).sum(),
        intervals,
        breaks,
    }
}
