//! Path resolution for pomoclock configuration and data files.
//!
//! All data is stored in `~/.pomoclock/` (or `$POMOCLOCK_HOME`):
//! - `config.yaml` - Settings
//! - `pomoclock.db` - `SQLite` history of completed sessions
//! - `pomoclock.log` - Log output

use std::path::PathBuf;

use crate::error::PomoError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "POMOCLOCK_HOME";

/// Paths to pomoclock configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomoclock/`
    pub root: PathBuf,
    /// Config file: `~/.pomoclock/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.pomoclock/pomoclock.db`
    pub database: PathBuf,
    /// Log file: `~/.pomoclock/pomoclock.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$POMOCLOCK_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, PomoError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var_os("HOME").ok_or_else(|| {
            PomoError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomoclock")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("pomoclock.db"),
            log_file: root.join("pomoclock.log"),
            root,
        }
    }

    /// Create the root directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomoError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                PomoError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-pomoclock");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("pomoclock.db"));
        assert_eq!(paths.log_file, root.join("pomoclock.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("root"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op.
        paths.ensure_dirs().unwrap();
    }
}
