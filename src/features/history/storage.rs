//! Session storage.
//!
//! Persists completed work sessions to the local database.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rusqlite::{params, types::Type, Row};
use serde::{Deserialize, Serialize};

use super::report::{week_start, WeeklyHistory};
use crate::error::PomoError;
use crate::features::cycle::SessionStore;
use crate::storage::Database;

/// A completed work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Database ID
    pub id: i64,
    /// When the work phase reached its duration
    pub completed_at: DateTime<Utc>,
    /// Length of the completed work phase in minutes
    pub duration_minutes: u32,
}

/// `SQLite`-backed [`SessionStore`].
pub struct SqliteSessionStore {
    db: Database,
}

impl SqliteSessionStore {
    /// Create a store over an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a record and return its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(
        &self,
        completed_at: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Result<i64, PomoError> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO sessions (completed_at, duration_minutes) VALUES (?1, ?2)",
            params![completed_at.to_rfc3339(), duration_minutes],
        )
        .map_err(|e| PomoError::Database(format!("Failed to insert session: {e}")))?;

        Ok(conn.last_insert_rowid())
    }

    /// Records completed in `[start, end)`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SessionRecord>, PomoError> {
        self.query(
            r"SELECT id, completed_at, duration_minutes
              FROM sessions
              WHERE completed_at >= ?1 AND completed_at < ?2
              ORDER BY completed_at ASC",
            &[&start.to_rfc3339(), &end.to_rfc3339()],
        )
    }

    /// The most recent records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<SessionRecord>, PomoError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            r"SELECT id, completed_at, duration_minutes
              FROM sessions
              ORDER BY completed_at DESC
              LIMIT ?1",
            &[&limit],
        )
    }

    /// The `weeks` consecutive weeks ending with the week of `today`.
    ///
    /// Only the records that can fall inside the window are read. The window
    /// is widened by a day on each side so that any timezone offset is
    /// covered; grouping then drops whatever lies outside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn weekly<Tz: TimeZone>(
        &self,
        tz: &Tz,
        today: NaiveDate,
        weeks: usize,
    ) -> Result<WeeklyHistory, PomoError> {
        let current = week_start(today);
        let span = i64::try_from(weeks.saturating_sub(1)).unwrap_or(i64::MAX / 8);
        let oldest = current - Duration::weeks(span);

        let start = (oldest - Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
        let end = (current + Duration::days(8)).and_time(NaiveTime::MIN).and_utc();

        let records = self.between(start, end)?;
        Ok(WeeklyHistory::last_weeks(&records, tz, today, weeks))
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<i64, PomoError> {
        self.db
            .connection()
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .map_err(|e| PomoError::Database(format!("Failed to count sessions: {e}")))
    }

    /// Delete every record. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, PomoError> {
        self.db
            .connection()
            .execute("DELETE FROM sessions", [])
            .map_err(|e| PomoError::Database(format!("Failed to delete sessions: {e}")))
    }

    fn query(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<SessionRecord>, PomoError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| PomoError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_record)
            .map_err(|e| PomoError::Database(format!("Failed to query sessions: {e}")))?;

        let records = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PomoError::Database(format!("Failed to read session: {e}")))?;
        Ok(records)
    }
}

impl SessionStore for SqliteSessionStore {
    fn record(
        &mut self,
        completed_at: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Result<(), PomoError> {
        let id = self.insert(completed_at, duration_minutes)?;
        tracing::info!(id, %completed_at, "recorded completed session");
        Ok(())
    }

    fn all(&self) -> Result<Vec<SessionRecord>, PomoError> {
        self.query(
            r"SELECT id, completed_at, duration_minutes
              FROM sessions
              ORDER BY completed_at ASC",
            &[],
        )
    }
}

fn row_to_record(row: &Row<'_>) -> Result<SessionRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let completed_at: String = row.get(1)?;
    let duration_minutes: u32 = row.get(2)?;

    let completed_at = DateTime::parse_from_rfc3339(&completed_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

    Ok(SessionRecord {
        id,
        completed_at,
        duration_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteSessionStore {
        SqliteSessionStore::with_database(Database::open_in_memory().unwrap())
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_record_and_all() {
        let mut store = create_test_store();
        store.record(at(5, 10), 25).unwrap();
        store.record(at(4, 9), 25).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].completed_at, at(4, 9));
        assert_eq!(all[1].completed_at, at(5, 10));
        assert_eq!(all[0].duration_minutes, 25);
    }

    #[test]
    fn test_between_is_half_open() {
        let store = create_test_store();
        store.insert(at(1, 8), 25).unwrap();
        store.insert(at(2, 8), 25).unwrap();
        store.insert(at(3, 8), 25).unwrap();

        let found = store.between(at(1, 8), at(3, 8)).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].completed_at, at(2, 8));
    }

    #[test]
    fn test_recent_newest_first() {
        let store = create_test_store();
        for day in 1..=5 {
            store.insert(at(day, 12), 25).unwrap();
        }

        let recent = store.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].completed_at, at(5, 12));
    }

    #[test]
    fn test_count_and_clear() {
        let store = create_test_store();
        store.insert(at(1, 8), 25).unwrap();
        store.insert(at(1, 9), 50).unwrap();

        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_weekly_reads_only_the_window() {
        let store = create_test_store();
        // 2024-03-04 and 2024-03-11 are Mondays.
        store.insert(at(4, 9), 25).unwrap();
        store.insert(at(12, 9), 25).unwrap();
        store.insert(at(13, 9), 25).unwrap();
        store
            .insert(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(), 25)
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let history = store.weekly(&Utc, today, 2).unwrap();

        assert_eq!(history.weeks.len(), 2);
        assert_eq!(history.weeks[0].count, 2);
        assert_eq!(history.weeks[1].count, 1);
        assert_eq!(history.total_sessions(), 3);
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("history.db");

        {
            let mut store = SqliteSessionStore::with_database(Database::open_at(&path).unwrap());
            store.record(at(7, 7), 25).unwrap();
        }

        let store = SqliteSessionStore::with_database(Database::open_at(&path).unwrap());
        assert_eq!(store.all().unwrap().len(), 1);
    }
}
