//! The Pomodoro cycle.
//!
//! Work and break phases driven by a periodic tick:
//! - Validated durations and display mode
//! - A pausable stopwatch over a pluggable clock
//! - The controller state machine and the sinks it reports to

pub mod config;
pub mod controller;
pub mod phase;
pub mod ports;
pub mod stopwatch;

pub use config::CycleConfig;
pub use controller::CycleController;
pub use phase::{CycleState, DisplayUpdate, Notice, Phase, VisualState};
pub use ports::{DisplaySink, NotificationSink, SessionStore};
pub use stopwatch::{format_mmss, Clock, ManualClock, Stopwatch, SystemClock};

#[cfg(test)]
pub(crate) mod testing;
