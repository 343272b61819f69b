//! Log setup.
//!
//! The TUI owns the terminal, so log lines go to `pomoclock.log`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Paths;
use crate::error::PomoError;

/// Filter from `RUST_LOG`, falling back to `default_level`.
///
/// An unparsable fallback degrades to `info`.
#[must_use]
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, appending to the log file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(paths: &Paths, default_level: &str) -> Result<(), PomoError> {
    paths.ensure_dirs()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter(default_level))
        .try_init()
        .map_err(|e| PomoError::Config(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_levels() {
        // Must not panic on either a valid or a garbage fallback.
        let _ = env_filter("debug");
        let _ = env_filter("pomoclock=trace,warn");
        let _ = env_filter("not a [valid filter");
    }
}
