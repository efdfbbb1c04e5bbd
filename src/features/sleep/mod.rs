//! # Sleep Timer Feature
//!
//! In-memory sleep timers: scheduling, cancellation and periodic expiry.
//! Timers do not survive a restart; that is an accepted limitation of the
//! design, not a bug.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Collapse the timer/deadline maps into a single store
//! - 1.0.0: Initial port of the scheduling and sweep logic

pub mod schedule;
pub mod store;
pub mod sweeper;

pub use schedule::{
    cancel, now_local, resolve_deadline, schedule, CancelError, ScheduleError, BOT_TIMEZONE,
};
pub use store::{SleepTimer, TimerStore};
pub use sweeper::{SleepSweeper, SWEEP_INTERVAL};
