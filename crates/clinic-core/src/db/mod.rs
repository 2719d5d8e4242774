//! Storage layer: a SQLite-backed key-value store holding one JSON list per
//! record type.

mod schema;
mod store;
mod records;
mod patients;
mod appointments;
mod catalog;
mod lab_work;

pub use schema::*;
pub use store::*;
#[allow(unused_imports)]
pub use patients::*;
pub use lab_work::LabUpdateError;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Stored text under `key` is not a JSON list; writes to it are refused.
    #[error("Unreadable store {key}: {reason}")]
    Unreadable { key: String, reason: String },
}

pub type DbResult<T> = Result<T, DbError>;

/// Default prefix for store keys, e.g. `adc_patients`.
pub const DEFAULT_KEY_PREFIX: &str = "adc_";

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
    key_prefix: String,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::open_with_prefix(path, DEFAULT_KEY_PREFIX)
    }

    /// Open database at path with a custom store key prefix.
    pub fn open_with_prefix<P: AsRef<Path>>(path: P, key_prefix: &str) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn,
            key_prefix: key_prefix.to_string(),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Self::open_in_memory_with_prefix(DEFAULT_KEY_PREFIX)
    }

    /// In-memory database with a custom store key prefix.
    pub fn open_in_memory_with_prefix(key_prefix: &str) -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            key_prefix: key_prefix.to_string(),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for Database {
    fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn set_item(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }

    fn set_items(&self, entries: &[(String, String)]) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                r#"
                INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
