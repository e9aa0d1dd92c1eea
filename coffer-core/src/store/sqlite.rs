use crate::errors::StoreError;
use crate::key::Key;
use crate::store::KvStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::error;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS secrets (key TEXT PRIMARY KEY, value TEXT NOT NULL)";

/// SQLite-backed store holding one `secrets (key, value)` table.
///
/// The connection is serialized behind a mutex; upserts rely on SQLite's
/// conflict clause so concurrent duplicate creates stay idempotent.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref()).map_err(|err| {
            error!(path = %path.as_ref().display(), %err, "failed to open sqlite database");
            StoreError::new("error opening the store")
        })?;
        Self::with_connection(conn)
    }

    /// Open a private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|err| {
            error!(%err, "failed to open in-memory sqlite database");
            StoreError::new("error opening the store")
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(CREATE_TABLE, []).map_err(|err| {
            error!(%err, "failed to create secrets table");
            StoreError::new("error opening the store")
        })?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::new("sqlite store lock poisoned"))
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM secrets WHERE key = ?1",
            params![key.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|err| {
            error!(%key, %err, "failed to fetch key");
            StoreError::new("error occurred while trying to get key")
        })
    }

    fn set(&self, key: &Key, value: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO secrets (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key.as_str(), value],
        )
        .map_err(|err| {
            error!(%key, %err, "failed to store key");
            StoreError::new("error occurred while trying to store key")
        })?;
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Option<BTreeMap<String, String>>, StoreError> {
        let conn = self.conn()?;
        // substr comparison instead of LIKE so wildcard characters in the
        // prefix are matched literally.
        let mut statement = conn
            .prepare("SELECT key, value FROM secrets WHERE substr(key, 1, length(?1)) = ?1")
            .map_err(|err| {
                error!(%err, "failed to prepare list query");
                StoreError::new("error occurred while trying to list keys")
            })?;
        let rows = statement
            .query_map(params![prefix], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|err| {
                error!(%prefix, %err, "failed to list keys");
                StoreError::new("error occurred while trying to list keys")
            })?;

        let mut matches = BTreeMap::new();
        for row in rows {
            let (key, value) = row.map_err(|err| {
                error!(%prefix, %err, "failed to read listed row");
                StoreError::new("error occurred while trying to list keys")
            })?;
            matches.insert(key, value);
        }
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches))
        }
    }
}
