pub mod calculator;
pub mod service;
pub mod transitions;

pub use service::{TimerService, TimerSnapshot};
pub use transitions::{LedgerAction, TimerOp, Transition, transition};
