//! Tick orchestration: the per-minute evaluation pipeline, day-boundary
//! rollover, session bookkeeping, and the tracker that owns persistence.

mod day_roll;
mod engine;
mod session;
mod tracker;

pub use day_roll::{roll_if_needed, DayRollOutcome};
pub use engine::{evaluate_tick, stats_snapshot, TickContext, TickOutcome,
    DISTRACTION_WARNING_THRESHOLD};
pub use session::{Session, SESSION_MIN_SECS};
pub use tracker::{TickReport, Tracker};
