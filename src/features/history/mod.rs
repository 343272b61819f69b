//! History of completed work sessions.
//!
//! Completed work phases are stored as timestamped records and read back
//! grouped by calendar week.

pub mod report;
pub mod storage;

pub use report::{week_start, WeekSummary, WeeklyHistory};
pub use storage::{SessionRecord, SqliteSessionStore};
