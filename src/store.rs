//! SQLite storage for tasks.
//!
//! A [`Store`] owns the single connection used for the lifetime of the
//! process. Opening a store always leaves the `tasks` table in place, so every
//! repository handed out by [`Store::tasks`] can assume the schema exists.

use crate::error::{Result, TaskError};
use crate::repository::TaskRepository;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    is_done INTEGER DEFAULT 0,
    created_at DATETIME,
    created_by TEXT,
    category TEXT
);";

const TASK_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "description",
    "is_done",
    "created_at",
    "created_by",
    "category",
];

pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug)]
pub struct Store {
    conn: Connection,
    location: PathBuf,
}

impl Store {
    /// Open (or create) the database file at `location` and install the schema.
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        let location = location.as_ref().to_path_buf();
        if location.as_os_str() == IN_MEMORY {
            return Self::open_in_memory();
        }

        info!("Opening task store at {}", location.display());
        let conn = Connection::open(&location).map_err(|err| {
            warn!("Failed to open {}: {err}", location.display());
            TaskError::StorageUnavailable(err)
        })?;

        let store = Self { conn, location };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory task store");
        let conn = Connection::open_in_memory().map_err(TaskError::StorageUnavailable)?;
        let store = Self {
            conn,
            location: PathBuf::from(IN_MEMORY),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the `tasks` table if absent, then check that an existing table
    /// carries every column the repository reads and writes.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_TASKS)?;

        let mut stmt = self.conn.prepare("PRAGMA table_info(tasks)")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if let Some(missing) = TASK_COLUMNS
            .iter()
            .find(|expected| !columns.iter().any(|c| c.eq_ignore_ascii_case(expected)))
        {
            warn!("Existing tasks table is missing column {missing}");
            return Err(TaskError::Schema(format!(
                "tasks table is missing column `{missing}`"
            )));
        }

        debug!("Schema ready ({} columns)", columns.len());
        Ok(())
    }

    pub fn tasks(&self) -> TaskRepository<'_> {
        TaskRepository::new(&self.conn)
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Release the connection, reporting a failed close instead of swallowing it.
    pub fn close(self) -> Result<()> {
        info!("Closing task store at {}", self.location.display());
        self.conn.close().map_err(|(_, err)| {
            warn!("Failed to close task store: {err}");
            TaskError::StorageUnavailable(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_has_tasks_table() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.location(), Path::new(IN_MEMORY));
        assert!(store.tasks().list_all().unwrap().is_empty());
    }

    #[test]
    fn memory_location_is_recognised_by_open() {
        let store = Store::open(IN_MEMORY).unwrap();
        assert!(store.tasks().list_all().unwrap().is_empty());
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
    }

    #[test]
    fn conflicting_table_is_a_schema_error() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute_batch("DROP TABLE tasks; CREATE TABLE tasks (id INTEGER PRIMARY KEY, title TEXT);")
            .unwrap();

        let err = store.ensure_schema().unwrap_err();
        assert!(matches!(err, TaskError::Schema(ref msg) if msg.contains("name")));
    }

    #[test]
    fn close_releases_connection() {
        let store = Store::open_in_memory().unwrap();
        store.close().unwrap();
    }
}
