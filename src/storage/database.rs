//! `SQLite` database connection.
//!
//! The database lives at `~/.pomoclock/pomoclock.db` by default.

use std::path::Path;

use rusqlite::Connection;

use crate::error::PomoError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, PomoError> {
        let conn = Connection::open(path).map_err(|e| {
            PomoError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, PomoError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            PomoError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, PomoError> {
        // The UI thread reads while the cycle thread writes.
        conn.busy_timeout(std::time::Duration::from_secs(2))
            .map_err(|e| PomoError::Database(format!("Failed to set busy timeout: {e}")))?;

        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, PomoError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
