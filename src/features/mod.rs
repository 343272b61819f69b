//! Feature implementations for pomoclock.
//!
//! - The Pomodoro cycle and its collaborator traits
//! - Completed-session history and weekly reports
//! - Sound and desktop notifications

pub mod cycle;
pub mod history;
pub mod notify;
