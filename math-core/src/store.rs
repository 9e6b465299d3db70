//! SQLite-backed append-only log of executed operations

use crate::error::{MathError, Result};
use crate::operation::Operation;
use crate::record::{local_timestamp, OperationRecord};
use rusqlite::{params, Connection, OpenFlags};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Default database file, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "math_operations.db";

const CREATE_OPERATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS operations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    operation TEXT,
    a REAL,
    b REAL,
    result REAL,
    timestamp TEXT
)";

const CHECK_OPERATIONS_TABLE: &str = "SELECT 1 FROM operations LIMIT 1";

const INSERT_OPERATION: &str =
    "INSERT INTO operations (operation, a, b, result, timestamp) VALUES (?1, ?2, ?3, ?4, ?5)";

/// Store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// How long a writer waits on a locked database
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl StoreConfig {
    /// Configuration for a database at `path` with default settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

/// Append-only operation store.
///
/// Holds no open connection: each write opens its own and drops it when
/// the write completes or fails.
#[derive(Debug, Clone)]
pub struct OperationStore {
    config: StoreConfig,
}

impl OperationStore {
    /// Open the store, creating the file and schema if absent
    pub fn open(config: StoreConfig) -> Result<Self> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;

        let store = Self { config };
        store.ensure_schema()?;

        info!("Operation store ready at {}", store.path().display());
        Ok(store)
    }

    /// Database file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Create the `operations` table if it does not exist. Idempotent.
    pub fn ensure_schema(&self) -> Result<()> {
        let connection = self.connect()?;
        connection.execute_batch(CREATE_OPERATIONS_TABLE)?;
        Ok(())
    }

    /// Append one record and return it as persisted.
    ///
    /// The insert runs in autocommit mode, so it is committed before this returns.
    pub fn append(
        &self,
        operation: Operation,
        a: f64,
        b: f64,
        result: f64,
    ) -> Result<OperationRecord> {
        let connection = self.connect()?;
        let timestamp = local_timestamp();

        connection.execute(
            INSERT_OPERATION,
            params![operation.name(), a, b, result, timestamp],
        )?;
        let id = connection.last_insert_rowid();

        debug!("Persisted {} as row {}", operation, id);

        Ok(OperationRecord {
            id,
            operation,
            a,
            b,
            result,
            timestamp,
        })
    }

    /// Check that the existing database can be opened and the table read.
    ///
    /// Opens without `SQLITE_OPEN_CREATE`, so a deleted file is reported
    /// rather than silently recreated empty.
    pub fn check_connection(&self) -> Result<()> {
        let connection = self.open_with(OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        connection.prepare(CHECK_OPERATIONS_TABLE)?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        self.open_with(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
    }

    fn open_with(&self, flags: OpenFlags) -> Result<Connection> {
        let flags = flags | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(&self.config.path, flags)?;
        connection.busy_timeout(Duration::from_millis(self.config.busy_timeout_ms))?;
        Ok(connection)
    }
}

fn validate_store_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(MathError::InvalidConfig(
            "store path must not be empty".to_string(),
        ));
    }
    if path.is_dir() {
        return Err(MathError::InvalidConfig(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, OperationStore) {
        let dir = TempDir::new().unwrap();
        let store = OperationStore::open(StoreConfig::new(dir.path().join("ops.db"))).unwrap();
        (dir, store)
    }

    fn count_rows(store: &OperationStore) -> i64 {
        store
            .connect()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM operations", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let (_dir, store) = temp_store();

        let first = store.append(Operation::Add, 10.0, 5.0, 15.0).unwrap();
        let second = store.append(Operation::Divide, 10.0, 5.0, 2.0).unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.operation, Operation::Add);
        assert_eq!(second.result, 2.0);
        assert_eq!(count_rows(&store), 2);
    }

    #[test]
    fn test_append_persists_row_contents() {
        let (_dir, store) = temp_store();
        let record = store.append(Operation::Multiply, 2.5, 4.0, 10.0).unwrap();

        let row: (String, f64, f64, f64, String) = store
            .connect()
            .unwrap()
            .query_row(
                "SELECT operation, a, b, result, timestamp FROM operations WHERE id = ?1",
                params![record.id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .unwrap();

        assert_eq!(row.0, "multiply");
        assert_eq!((row.1, row.2, row.3), (2.5, 4.0, 10.0));
        assert_eq!(row.4, record.timestamp);
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let (_dir, store) = temp_store();
        let record = store.append(Operation::Subtract, 3.0, 1.0, 2.0).unwrap();

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        assert_eq!(count_rows(&store), 1);
        let operation: String = store
            .connect()
            .unwrap()
            .query_row(
                "SELECT operation FROM operations WHERE id = ?1",
                params![record.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(operation, "subtract");
    }

    #[test]
    fn test_reopen_keeps_existing_records() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("ops.db"));

        let store = OperationStore::open(config.clone()).unwrap();
        store.append(Operation::Add, 1.0, 1.0, 2.0).unwrap();
        drop(store);

        let reopened = OperationStore::open(config).unwrap();
        assert_eq!(count_rows(&reopened), 1);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("ops.db");
        let store = OperationStore::open(StoreConfig::new(&path)).unwrap();
        assert!(path.exists());
        assert!(store.check_connection().is_ok());
    }

    #[test]
    fn test_open_rejects_directory_path() {
        let dir = TempDir::new().unwrap();
        let err = OperationStore::open(StoreConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, MathError::InvalidConfig(_)));
    }

    #[test]
    fn test_open_rejects_empty_path() {
        let err = OperationStore::open(StoreConfig::new("")).unwrap_err();
        assert!(matches!(err, MathError::InvalidConfig(_)));
    }

    #[test]
    fn test_append_fails_when_table_missing() {
        let (_dir, store) = temp_store();
        store
            .connect()
            .unwrap()
            .execute_batch("DROP TABLE operations")
            .unwrap();

        let err = store.append(Operation::Add, 1.0, 2.0, 3.0).unwrap_err();
        assert!(matches!(err, MathError::Storage(_)));
    }

    #[test]
    fn test_check_connection_reports_missing_file() {
        let (_dir, store) = temp_store();
        assert!(store.check_connection().is_ok());

        std::fs::remove_file(store.path()).unwrap();

        let err = store.check_connection().unwrap_err();
        assert!(matches!(err, MathError::Storage(_)));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_check_connection_reports_missing_table() {
        let (_dir, store) = temp_store();
        store
            .connect()
            .unwrap()
            .execute_batch("DROP TABLE operations")
            .unwrap();

        assert!(store.check_connection().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.busy_timeout_ms, 5_000);
    }
}
