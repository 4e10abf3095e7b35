//! SQLite-backed key-value store

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;

use crate::config::Settings;
use crate::storage::store::{Entries, KeyValueStore};
use crate::{Result, WriteWiseError};

/// Preference store persisted in a single SQLite table
pub struct SqliteStore {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

impl SqliteStore {
    /// Open or create the store under the configured data directory
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_path(&db_path)
    }

    /// Open the store at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "Opened preference store");

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory store (for testing)
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            return Err(WriteWiseError::Config(format!(
                "Store schema version {} is newer than supported version {}",
                current_version, CURRENT_SCHEMA_VERSION
            )));
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute_batch(&format!("PRAGMA user_version = {};", version))?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn get_one(&self, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, keys: &[&str]) -> Result<Entries> {
        let mut entries = Entries::new();
        for key in keys {
            if let Some(value) = self.get_one(key)? {
                entries.insert(key.to_string(), value);
            }
        }
        Ok(entries)
    }

    fn set(&self, entries: Entries) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in &entries {
            tx.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, serde_json::to_string(value)?],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}
