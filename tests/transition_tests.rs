mod common;
use common::at;
use teamclock::core::timer::{LedgerAction, TimerOp, transition};
use teamclock::models::status::TimerStatus;
use teamclock::models::timed_entity::TimerState;

fn run(ops: &[(TimerOp, i64)]) -> TimerState {
    ops.iter().fold(TimerState::default(), |state, (op, secs)| {
        let next = transition(&state, *op, at(*secs)).state;
        assert!(next.is_consistent(), "inconsistent after {:?}", op);
        next
    })
}

#[test]
fn test_start_sets_running_and_opens_ledger() {
    let t = transition(&TimerState::default(), TimerOp::Start, at(0));
    assert!(t.changed);
    assert!(t.state.running);
    assert_eq!(t.state.last_started_at, Some(at(0)));
    assert_eq!(t.state.status, TimerStatus::Running);
    assert_eq!(t.ledger, LedgerAction::Open(at(0)));
}

#[test]
fn test_second_start_is_noop() {
    let started = transition(&TimerState::default(), TimerOp::Start, at(0)).state;
    let again = transition(&started, TimerOp::Start, at(30));
    assert!(!again.changed);
    assert_eq!(again.state, started);
    assert_eq!(again.ledger, LedgerAction::None);

    let paused = transition(&again.state, TimerOp::Pause, at(40)).state;
    assert_eq!(paused.total_seconds, 40);
}

#[test]
fn test_pause_folds_elapsed() {
    let s = run(&[(TimerOp::Start, 0), (TimerOp::Pause, 65)]);
    assert_eq!(s.total_seconds, 65);
    assert!(!s.running);
    assert_eq!(s.last_started_at, None);
    assert_eq!(s.status, TimerStatus::Paused);
}

#[test]
fn test_pause_when_not_running_is_noop() {
    let t = transition(&TimerState::default(), TimerOp::Pause, at(10));
    assert!(!t.changed);
    assert_eq!(t.state, TimerState::default());
}

#[test]
fn test_two_intervals_accumulate_independent_of_gap() {
    for gap in [0_i64, 1, 3600, 86_400] {
        let s = run(&[
            (TimerOp::Start, 0),
            (TimerOp::Pause, 100),
            (TimerOp::Start, 100 + gap),
            (TimerOp::Pause, 100 + gap + 25),
        ]);
        assert_eq!(s.total_seconds, 125, "gap={gap}");
    }
}

#[test]
fn test_documented_scenario_65_then_30() {
    let s = run(&[
        (TimerOp::Start, 0),
        (TimerOp::Pause, 65),
        (TimerOp::Start, 200),
        (TimerOp::Stop, 230),
    ]);
    assert_eq!(s.total_seconds, 95);
    assert_eq!(s.status, TimerStatus::Stopped);
}

#[test]
fn test_stop_when_not_running_keeps_total() {
    let paused = run(&[(TimerOp::Start, 0), (TimerOp::Pause, 50)]);
    let t = transition(&paused, TimerOp::Stop, at(500));
    assert_eq!(t.state.total_seconds, 50);
    assert_eq!(t.state.status, TimerStatus::Stopped);

    let again = transition(&t.state, TimerOp::Stop, at(900));
    assert!(!again.changed);
    assert_eq!(again.state.total_seconds, 50);
}

#[test]
fn test_resume_behaves_like_start() {
    let paused = run(&[(TimerOp::Start, 0), (TimerOp::Pause, 10)]);
    let t = transition(&paused, TimerOp::Resume, at(20));
    assert!(t.state.running);
    assert_eq!(t.ledger, LedgerAction::Open(at(20)));
}

#[test]
fn test_reset_from_any_state() {
    let states = [
        TimerState::default(),
        run(&[(TimerOp::Start, 0)]),
        run(&[(TimerOp::Start, 0), (TimerOp::Pause, 90)]),
        run(&[(TimerOp::Start, 0), (TimerOp::Stop, 90)]),
    ];

    for s in states {
        let t = transition(&s, TimerOp::Reset, at(1000));
        assert_eq!(t.state.total_seconds, 0);
        assert!(!t.state.running);
        assert_eq!(t.state.last_started_at, None);
        assert_eq!(t.state.status, TimerStatus::Pending);

        let expected = if s.running {
            LedgerAction::Close(at(1000))
        } else {
            LedgerAction::None
        };
        assert_eq!(t.ledger, expected);
    }
}

#[test]
fn test_status_never_changes_state() {
    let running = run(&[(TimerOp::Start, 0)]);
    let t = transition(&running, TimerOp::Status, at(99));
    assert!(!t.changed);
    assert_eq!(t.state, running);
}
