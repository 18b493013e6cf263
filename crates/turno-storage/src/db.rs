//! Connection handle for the conversation store.
//!
//! One rusqlite `Connection` behind a `Mutex`, opened in WAL mode with
//! foreign keys on, migrated to the current schema before anyone gets to
//! touch it. Repositories share the handle through `Arc<Database>` and
//! borrow the connection with [`Database::with_conn`].

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use turno_core::error::TurnoError;

use crate::migrations;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the store at `path`, creating the file and any missing parent
    /// directories, and bring the schema up to date.
    pub fn new(path: &Path) -> Result<Self, TurnoError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .map_err(|e| TurnoError::Storage(format!("Cannot open {}: {}", path.display(), e)))?;
        let db = Self::prepare(conn)?;
        info!(path = %path.display(), "Conversation store ready");
        Ok(db)
    }

    /// Fresh in-memory store with the full schema, for tests.
    pub fn in_memory() -> Result<Self, TurnoError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TurnoError::Storage(format!("Cannot open in-memory store: {}", e)))?;
        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self, TurnoError> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|e| TurnoError::Storage(format!("Cannot set pragmas: {}", e)))?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Run `f` with the connection. The lock is held for the whole call,
    /// so keep the closure to one query or one transaction.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, TurnoError>
    where
        F: FnOnce(&Connection) -> Result<T, TurnoError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| TurnoError::Storage(format!("Store lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
