//! SQLite schema for the ledger state.
//!
//! Tables:
//! - `ledger_state`: one row per (namespace, key), value is the JSON record

/// DDL for the ledger state table.
///
/// Schema version: 1
pub const LEDGER_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS ledger_state (
    namespace        TEXT NOT NULL,
    key              TEXT NOT NULL,
    value            BLOB NOT NULL,
    version          INTEGER NOT NULL DEFAULT 1,
    updated_at       INTEGER NOT NULL,
    PRIMARY KEY (namespace, key)
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(LEDGER_SCHEMA).unwrap();
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(LEDGER_SCHEMA).unwrap();
        conn.execute_batch(LEDGER_SCHEMA).unwrap();
    }
}
