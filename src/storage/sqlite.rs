use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};

use super::defaults::{validate_key, SharedDefaults, StorageError};

const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Shared defaults kept in one SQLite table. Each write is a single upsert,
/// so a reader in another process sees either the old or the new blob.
pub struct SqliteDefaults {
    conn: Mutex<Connection>,
}

impl SqliteDefaults {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        tracing::debug!("Opened shared defaults at {} (journal mode {})", path.display(), mode);

        let defaults = Self::new(conn);
        defaults.initialize()?;
        Ok(defaults)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let defaults = Self::new(Connection::open_in_memory()?);
        defaults.initialize()?;
        Ok(defaults)
    }

    pub fn initialize(&self) -> Result<(), StorageError> {
        self.connection()?.execute(
            "CREATE TABLE IF NOT EXISTS defaults (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let Ok(conn) = self.connection() else {
            return false;
        };
        let result: SqliteResult<i32> = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

#[async_trait]
impl SharedDefaults for SqliteDefaults {
    async fn data(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        let conn = self.connection()?;
        let value = conn
            .query_row("SELECT value FROM defaults WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    async fn set_data(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        self.connection()?.execute(
            "INSERT INTO defaults (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.connection()?
            .execute("DELETE FROM defaults WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_defaults_table() {
        let defaults = SqliteDefaults::new(Connection::open_in_memory().unwrap());

        defaults.initialize().unwrap();

        assert!(defaults.table_exists("defaults"));
        assert!(!defaults.table_exists("events"));
    }

    #[tokio::test]
    async fn stores_and_loads_blob() {
        let defaults = SqliteDefaults::open_in_memory().unwrap();

        defaults.set_data("savedEvents", b"[]").await.unwrap();

        assert_eq!(defaults.data("savedEvents").await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn loads_nonexistent_key_returns_none() {
        let defaults = SqliteDefaults::open_in_memory().unwrap();
        assert_eq!(defaults.data("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn overwrites_existing_key() {
        let defaults = SqliteDefaults::open_in_memory().unwrap();
        defaults.set_data("appSettings", b"original").await.unwrap();

        defaults.set_data("appSettings", b"updated").await.unwrap();

        assert_eq!(defaults.data("appSettings").await.unwrap(), Some(b"updated".to_vec()));
    }

    #[tokio::test]
    async fn deletes_key() {
        let defaults = SqliteDefaults::open_in_memory().unwrap();
        defaults.set_data("appState", b"{}").await.unwrap();

        defaults.remove("appState").await.unwrap();

        assert!(defaults.data("appState").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_connection_sees_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("group").join("defaults.sqlite");
        let app = SqliteDefaults::open(&path).unwrap();
        let widget = SqliteDefaults::open(&path).unwrap();

        app.set_data("savedEvents", b"[{\"title\":\"x\"}]").await.unwrap();

        assert_eq!(
            widget.data("savedEvents").await.unwrap(),
            Some(b"[{\"title\":\"x\"}]".to_vec())
        );
    }
}
