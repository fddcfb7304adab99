//! Pure timer state machine. No I/O: the service decides how to persist
//! the returned state and ledger action.

use super::calculator::interval_seconds;
use crate::models::status::TimerStatus;
use crate::models::timed_entity::TimerState;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimerOp {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
    Status,
}

impl TimerOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerOp::Start => "start",
            TimerOp::Pause => "pause",
            TimerOp::Resume => "resume",
            TimerOp::Stop => "stop",
            TimerOp::Reset => "reset",
            TimerOp::Status => "status",
        }
    }

    pub fn is_mutating(&self) -> bool {
        !matches!(self, TimerOp::Status)
    }
}

/// What must happen to the timesheet ledger as a consequence of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    None,
    /// Open an entry at this instant, unless one is already open.
    Open(DateTime<Utc>),
    /// Close the open entry (if any) at this instant.
    Close(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: TimerState,
    pub ledger: LedgerAction,
    pub changed: bool,
}

impl Transition {
    fn unchanged(state: TimerState) -> Self {
        Self {
            state,
            ledger: LedgerAction::None,
            changed: false,
        }
    }
}

/// Folds the running interval into `total_seconds` and clears accrual.
fn fold(state: &TimerState, now: DateTime<Utc>, status: TimerStatus) -> TimerState {
    let delta = state
        .last_started_at
        .map(|started| interval_seconds(started, now))
        .unwrap_or(0);

    TimerState {
        total_seconds: state.total_seconds + delta,
        running: false,
        last_started_at: None,
        status,
    }
}

/// Applies `op` to `state` at server time `now`.
///
/// Repeating a transition that already happened (pausing a paused timer,
/// starting a running one, ...) returns the state unchanged with
/// `changed = false` and no ledger action.
pub fn transition(state: &TimerState, op: TimerOp, now: DateTime<Utc>) -> Transition {
    match op {
        TimerOp::Start | TimerOp::Resume => {
            if state.running {
                return Transition::unchanged(*state);
            }
            Transition {
                state: TimerState {
                    total_seconds: state.total_seconds,
                    running: true,
                    last_started_at: Some(now),
                    status: TimerStatus::Running,
                },
                ledger: LedgerAction::Open(now),
                changed: true,
            }
        }

        TimerOp::Pause => {
            if !state.running {
                return Transition::unchanged(*state);
            }
            Transition {
                state: fold(state, now, TimerStatus::Paused),
                ledger: LedgerAction::Close(now),
                changed: true,
            }
        }

        TimerOp::Stop => {
            if state.running {
                return Transition {
                    state: fold(state, now, TimerStatus::Stopped),
                    ledger: LedgerAction::Close(now),
                    changed: true,
                };
            }
            if state.status == TimerStatus::Stopped {
                return Transition::unchanged(*state);
            }
            // paused or pending: total untouched, lifecycle closes
            Transition {
                state: TimerState {
                    status: TimerStatus::Stopped,
                    ..*state
                },
                ledger: LedgerAction::Close(now),
                changed: true,
            }
        }

        TimerOp::Reset => {
            let reset = TimerState::default();
            // an interval still accruing ends at the reset instant
            let ledger = if state.running {
                LedgerAction::Close(now)
            } else {
                LedgerAction::None
            };
            Transition {
                changed: reset != *state,
                state: reset,
                ledger,
            }
        }

        TimerOp::Status => Transition::unchanged(*state),
    }
}
