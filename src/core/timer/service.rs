use super::calculator::{elapsed_for, interval_seconds};
use super::transitions::{LedgerAction, TimerOp, transition};
use crate::core::clock::Clock;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_entry, find_open_entry, load_entity, load_entry, open_entry, require_user, update_timer,
};
use crate::errors::{AppError, AppResult};
use crate::models::status::TimerStatus;
use crate::models::timed_entity::TimedEntity;
use crate::models::timesheet_entry::TimesheetEntry;
use crate::models::user::User;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

/// Result of one timer operation, as returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub entity_id: i64,
    pub op: TimerOp,
    pub total_seconds: i64,
    pub running: bool,
    pub last_started_at: Option<DateTime<Utc>>,
    pub status: TimerStatus,
    /// Live value at the instant the operation was stamped.
    pub elapsed_seconds: i64,
    /// False when the operation was a repeat of the current state.
    pub changed: bool,
    /// Ledger row touched by the operation, or the open one for `status`.
    pub entry: Option<TimesheetEntry>,
    pub at: DateTime<Utc>,
}

/// Timer bookkeeping over the SQLite store.
///
/// Every mutating call is one read-modify-write of a single entity inside
/// an IMMEDIATE transaction; `status` reads in a deferred one. Times are
/// stamped with the service clock at millisecond precision, as stored.
pub struct TimerService<'c> {
    clock: &'c dyn Clock,
}

/// Caller must belong to the entity's tenant; mutations are owner-only.
fn authorize(entity: &TimedEntity, user: &User, op: TimerOp) -> AppResult<()> {
    let denied = AppError::Unauthorized {
        kind: entity.kind.label(),
        id: entity.id,
        user: user.id,
    };

    if entity.tenant != user.tenant {
        return Err(denied);
    }
    if op.is_mutating() && entity.owner_id != user.id {
        return Err(denied);
    }
    Ok(())
}

fn apply_ledger(
    conn: &Connection,
    action: LedgerAction,
    entity_id: i64,
    user_id: i64,
) -> AppResult<Option<TimesheetEntry>> {
    match action {
        LedgerAction::None => find_open_entry(conn, entity_id, user_id),

        LedgerAction::Open(at) => {
            if let Some(open) = find_open_entry(conn, entity_id, user_id)? {
                return Ok(Some(open));
            }
            let id = open_entry(conn, entity_id, user_id, &at)?;
            load_entry(conn, id)
        }

        LedgerAction::Close(at) => match find_open_entry(conn, entity_id, user_id)? {
            Some(open) => {
                let duration = interval_seconds(open.start_time, at);
                close_entry(conn, open.id, &at, duration)?;
                load_entry(conn, open.id)
            }
            None => Ok(None),
        },
    }
}

impl<'c> TimerService<'c> {
    pub fn new(clock: &'c dyn Clock) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    /// Apply `op` to entity `entity_id` on behalf of `user_id`.
    ///
    /// Errors: `NotFound` for an unknown entity or user, `Unauthorized` when
    /// the user may not touch the entity. Repeated transitions succeed with
    /// `changed == false`.
    pub fn apply(
        &self,
        pool: &mut DbPool,
        entity_id: i64,
        user_id: i64,
        op: TimerOp,
    ) -> AppResult<TimerSnapshot> {
        let behavior = if op.is_mutating() {
            TransactionBehavior::Immediate
        } else {
            TransactionBehavior::Deferred
        };
        let tx = pool.conn.transaction_with_behavior(behavior)?;

        let entity = load_entity(&tx, entity_id)?.ok_or(AppError::NotFound {
            kind: "Entity",
            id: entity_id,
        })?;
        let user = require_user(&tx, user_id)?;
        authorize(&entity, &user, op)?;

        let now = self.now();
        let step = transition(&entity.timer, op, now);

        if step.changed {
            update_timer(&tx, entity.id, &step.state)?;
        }
        let entry = apply_ledger(&tx, step.ledger, entity.id, user.id)?;

        if step.changed {
            ttlog_quiet(
                &tx,
                op.as_str(),
                &format!("{} #{}", entity.kind.to_db_str(), entity.id),
                &format!(
                    "{} by user {}: total {}s, status {}",
                    op.as_str(),
                    user.id,
                    step.state.total_seconds,
                    step.state.status.to_db_str()
                ),
            );
        }

        tx.commit()?;

        Ok(TimerSnapshot {
            entity_id: entity.id,
            op,
            total_seconds: step.state.total_seconds,
            running: step.state.running,
            last_started_at: step.state.last_started_at,
            status: step.state.status,
            elapsed_seconds: elapsed_for(&step.state, now),
            changed: step.changed,
            entry,
            at: now,
        })
    }

    pub fn start(&self, pool: &mut DbPool, entity_id: i64, user_id: i64) -> AppResult<TimerSnapshot> {
        self.apply(pool, entity_id, user_id, TimerOp::Start)
    }

    pub fn pause(&self, pool: &mut DbPool, entity_id: i64, user_id: i64) -> AppResult<TimerSnapshot> {
        self.apply(pool, entity_id, user_id, TimerOp::Pause)
    }

    pub fn resume(&self, pool: &mut DbPool, entity_id: i64, user_id: i64) -> AppResult<TimerSnapshot> {
        self.apply(pool, entity_id, user_id, TimerOp::Resume)
    }

    pub fn stop(&self, pool: &mut DbPool, entity_id: i64, user_id: i64) -> AppResult<TimerSnapshot> {
        self.apply(pool, entity_id, user_id, TimerOp::Stop)
    }

    pub fn reset(&self, pool: &mut DbPool, entity_id: i64, user_id: i64) -> AppResult<TimerSnapshot> {
        self.apply(pool, entity_id, user_id, TimerOp::Reset)
    }

    pub fn status(&self, pool: &mut DbPool, entity_id: i64, user_id: i64) -> AppResult<TimerSnapshot> {
        self.apply(pool, entity_id, user_id, TimerOp::Status)
    }
}
