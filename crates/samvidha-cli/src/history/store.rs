//! SQLite-backed history storage
//!
//! The log is small (one row per day), so it is read and written whole.
//! `replace_all` swaps the stored log inside one transaction, which keeps
//! concurrent runs from ever seeing a half-written log.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::error::{Result, SamvidhaError};
use crate::history::HistoryEntry;

/// SQLite database holding the per-day attendance history
pub struct HistoryDb {
    conn: Connection,
}

impl HistoryDb {
    /// Open or create the history database
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(|e| {
            SamvidhaError::Database(format!("Failed to open history database: {}", e))
        })?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            SamvidhaError::Database(format!("Failed to open in-memory database: {}", e))
        })?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Run migrations
    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS attendance_history (
                    date TEXT PRIMARY KEY,
                    overall REAL NOT NULL,
                    biometric REAL NOT NULL
                );
                "#,
            )
            .map_err(|e| SamvidhaError::Database(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Load the full history, oldest first
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, overall, biometric FROM attendance_history ORDER BY date ASC")
            .map_err(|e| SamvidhaError::Database(format!("Failed to read history: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(HistoryEntry {
                    date: row.get(0)?,
                    overall: row.get(1)?,
                    biometric: row.get(2)?,
                })
            })
            .map_err(|e| SamvidhaError::Database(format!("Failed to read history: {}", e)))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| {
                SamvidhaError::Database(format!("Failed to read history row: {}", e))
            })?);
        }
        Ok(entries)
    }

    /// Replace the stored log with `entries` in a single transaction
    pub fn replace_all(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let tx = self.conn.transaction().map_err(|e| {
            SamvidhaError::Database(format!("Failed to start history transaction: {}", e))
        })?;

        tx.execute("DELETE FROM attendance_history", [])
            .map_err(|e| SamvidhaError::Database(format!("Failed to clear history: {}", e)))?;

        for entry in entries {
            tx.execute(
                "INSERT INTO attendance_history (date, overall, biometric) VALUES (?, ?, ?)",
                params![entry.date, entry.overall, entry.biometric],
            )
            .map_err(|e| SamvidhaError::Database(format!("Failed to write history: {}", e)))?;
        }

        tx.commit()
            .map_err(|e| SamvidhaError::Database(format!("Failed to commit history: {}", e)))
    }

    /// Remove every stored entry
    pub fn clear(&mut self) -> Result<()> {
        self.replace_all(&[])
    }
}

/// Default on-disk location of the history database
pub fn default_history_path() -> Result<PathBuf> {
    let dir = crate::config::data_dir()?;
    crate::config::ensure_dir(&dir)?;
    Ok(dir.join("history.db"))
}

/// User-supplied path if given, the default location otherwise
pub fn resolve_history_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => default_history_path(),
    }
}
