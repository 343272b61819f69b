//! Cycle runtime: a single consumer owning the controller.
//!
//! The UI thread queues [`Command`]s; a dedicated thread applies them and the
//! periodic ticks in arrival order, so no two transitions ever overlap.

mod actor;
mod commands;

pub use actor::{apply, spawn, ChannelDisplay, CycleHandle};
pub use commands::Command;
