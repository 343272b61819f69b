//! History and sessions commands.

use chrono::Local;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, SessionsArgs};
use crate::config::Paths;
use crate::error::PomoError;
use crate::features::history::{SessionRecord, SqliteSessionStore};
use crate::output::to_json;
use crate::storage::Database;

fn open_store(paths: &Paths) -> Result<SqliteSessionStore, PomoError> {
    paths.ensure_dirs()?;
    Ok(SqliteSessionStore::with_database(Database::open_at(
        &paths.database,
    )?))
}

/// Weekly completed-session counts ending with the current week.
///
/// # Errors
///
/// Returns an error if the database cannot be read or JSON output fails.
pub fn history(paths: &Paths, weeks: u16, format: OutputFormat) -> Result<String, PomoError> {
    let store = open_store(paths)?;
    let today = Local::now().date_naive();
    let report = store.weekly(&Local, today, usize::from(weeks))?;

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}

/// List the most recent sessions, or clear them all.
///
/// # Errors
///
/// Returns an error if `--clear` is given without `--force`, or if the
/// database cannot be read.
pub fn sessions(
    paths: &Paths,
    args: &SessionsArgs,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let store = open_store(paths)?;

    if args.clear {
        if !args.force {
            return Err(PomoError::Config(
                "This will delete all session history.\nUse --force to confirm.".to_string(),
            ));
        }
        let removed = store.clear()?;
        tracing::info!(removed, "cleared session history");
        return match format {
            OutputFormat::Json => to_json(&json!({ "removed": removed })),
            OutputFormat::Pretty => Ok(format!("Removed {removed} sessions.")),
        };
    }

    let total = store.count()?;
    let recent = store.recent(args.limit)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "total": total,
            "items": recent,
        })),
        OutputFormat::Pretty => Ok(format_sessions(&recent, total)),
    }
}

fn format_sessions(records: &[SessionRecord], total: i64) -> String {
    if records.is_empty() {
        return "No completed sessions yet.".dimmed().to_string();
    }

    let mut lines = vec![format!(
        "{} ({} of {})",
        "Recent sessions".bold(),
        records.len(),
        total
    )];
    for record in records {
        let local = record.completed_at.with_timezone(&Local);
        lines.push(format!(
            "  {}  {:>3} min",
            local.format("%a %Y-%m-%d %H:%M"),
            record.duration_minutes
        ));
    }
    lines.join("\n")
}
