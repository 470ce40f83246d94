//! Persisted-state store.
//!
//! The aggregate is written whole, in one transaction, under a single key:
//! either every field of a tick's outcome lands or none does. A rejected
//! write surfaces to the tick caller -- silently dropping a tick would break
//! the lifetime-total monotonicity invariant.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::state::ProgressionState;

const STATE_KEY: &str = "progression_state";

/// Atomic load/save/reset of the whole aggregate.
pub trait StateStore {
    /// Load the aggregate; a fresh or wiped store yields the default state.
    fn load(&self) -> Result<ProgressionState, StorageError>;
    /// Persist the aggregate atomically.
    fn save(&self, state: &ProgressionState) -> Result<(), StorageError>;
    /// Clear all persisted state.
    fn reset(&self) -> Result<(), StorageError>;
}

/// SQLite-backed store at `~/.config/tabquest/tabquest.db`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the default on-disk store, creating schema as needed.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
            .join("tabquest.db");
        Self::open_at(&path)
    }

    /// Open a store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> Result<ProgressionState, StorageError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let blob = match stmt.query_row(params![STATE_KEY], |row| row.get::<_, String>(0)) {
            Ok(v) => v,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Ok(ProgressionState::new());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&blob).map_err(|e| StorageError::CorruptState(e.to_string()))
    }

    fn save(&self, state: &ProgressionState) -> Result<(), StorageError> {
        let blob = serde_json::to_string(state)
            .map_err(|e| StorageError::CorruptState(e.to_string()))?;
        let mut conn = self.conn.lock().expect("store mutex poisoned");
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![STATE_KEY, blob],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn reset(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute("DELETE FROM kv WHERE key = ?1", params![STATE_KEY])?;
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
    /// When set, every save fails -- for exercising the persistence-failure
    /// path.
    pub fail_saves: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<ProgressionState, StorageError> {
        let blob = self.blob.lock().expect("store mutex poisoned");
        match blob.as_ref() {
            None => Ok(ProgressionState::new()),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| StorageError::CorruptState(e.to_string())),
        }
    }

    fn save(&self, state: &ProgressionState) -> Result<(), StorageError> {
        if self.fail_saves.load(std::sync::atomic::Ordering::Relaxed) {
            return Err(StorageError::QueryFailed("injected failure".to_string()));
        }
        let raw = serde_json::to_string(state)
            .map_err(|e| StorageError::CorruptState(e.to_string()))?;
        *self.blob.lock().expect("store mutex poisoned") = Some(raw);
        Ok(())
    }

    fn reset(&self) -> Result<(), StorageError> {
        *self.blob.lock().expect("store mutex poisoned") = None;
        Ok(())
    }
}
