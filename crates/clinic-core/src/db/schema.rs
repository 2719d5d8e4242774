//! SQLite schema definition.

/// Complete database schema. Every record store is one row of `kv_store`
/// whose value is a JSON array.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-value store (one row per record store, plus bookkeeping keys)
-- ============================================================================

CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                         -- JSON array, or an ISO timestamp
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_key_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?, ?)",
            ["adc_patients", "[]"],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?, ?)",
            ["adc_patients", "[]"],
        );
        assert!(result.is_err());
    }
}
