//! SqliteStore: SQLite-backed transactional key-value store.
//!
//! Provides the ledger substrate with:
//! - One atomic transaction per ledger operation (`BEGIN IMMEDIATE` .. `COMMIT`)
//! - Snapshot reads that skip the write lock (`BEGIN DEFERRED`, WAL mode)
//! - Rollback of every write when the operation fails
//! - Write-conflict detection across connections via SQLite's busy timeout

use super::{
    Namespace, SystemClock, Transaction, TransactionClock, TransactionalStore, LEDGER_SCHEMA,
};
use crate::errors::LedgerError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Default time a transaction waits on a competing writer before failing.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// SQLite-backed ledger store.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    clock: Arc<dyn TransactionClock>,
}

impl SqliteStore {
    /// Open a file-backed store, creating the parent directory if needed.
    pub fn open(path: &Path, busy_timeout_ms: u64) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LedgerError::Persistence(format!(
                        "failed to create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        Self::from_connection(conn)
    }

    /// Create an in-memory store (for testing).
    pub fn memory() -> Result<Self, LedgerError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Create store from existing connection (for multi-connection tests).
    pub fn from_connection(conn: Connection) -> Result<Self, LedgerError> {
        Self::init_connection(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the transaction clock.
    pub fn with_clock(mut self, clock: impl TransactionClock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    fn init_connection(conn: &Connection) -> Result<(), LedgerError> {
        // WAL mode for file-backed DBs (no-op for in-memory)
        let _ = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        });
        conn.execute_batch(LEDGER_SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, LedgerError> {
        self.conn
            .lock()
            .map_err(|_| LedgerError::Persistence("connection mutex poisoned".to_string()))
    }

    /// Row version of a key: 1 after the first write, +1 per overwrite (for testing/debugging).
    pub fn version_of(&self, namespace: &Namespace, key: &str) -> Result<Option<i64>, LedgerError> {
        let conn = self.lock()?;
        let version = conn
            .query_row(
                "SELECT version FROM ledger_state WHERE namespace = ?1 AND key = ?2",
                params![namespace.storage_name(), key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version)
    }

    /// Number of keys stored in a namespace (for testing/debugging).
    pub fn count_entries(&self, namespace: &Namespace) -> Result<u64, LedgerError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM ledger_state WHERE namespace = ?1",
            [namespace.storage_name()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

impl SqliteStore {
    fn run<T>(
        &self,
        begin: &'static str,
        f: impl FnOnce(&mut SqliteTxn<'_>) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let conn = self.lock()?;
        conn.execute_batch(begin)?;

        let mut txn = SqliteTxn {
            conn: &*conn,
            timestamp: self.clock.now_seconds(),
        };
        tracing::debug!(begin, timestamp = txn.timestamp, "ledger transaction begin");

        let result = f(&mut txn);

        match &result {
            Ok(_) => {
                if let Err(e) = conn.execute_batch("COMMIT") {
                    let _ = conn.execute_batch("ROLLBACK");
                    return Err(e.into());
                }
                tracing::debug!("ledger transaction commit");
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                tracing::debug!(error = %e, "ledger transaction rollback");
            }
        }

        result
    }
}

impl TransactionalStore for SqliteStore {
    fn transact<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, LedgerError>,
    {
        // BEGIN IMMEDIATE acquires the write lock before the first read
        self.run("BEGIN IMMEDIATE", |txn| f(txn))
    }

    fn view<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&dyn Transaction) -> Result<T, LedgerError>,
    {
        // WAL readers see the last commit and never wait on the writer
        self.run("BEGIN DEFERRED", |txn| f(&*txn))
    }
}

struct SqliteTxn<'c> {
    conn: &'c Connection,
    timestamp: i64,
}

impl Transaction for SqliteTxn<'_> {
    fn get(&self, namespace: &Namespace, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM ledger_state WHERE namespace = ?1 AND key = ?2",
                params![namespace.storage_name(), key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, namespace: &Namespace, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.conn.execute(
            r#"
            INSERT INTO ledger_state (namespace, key, value, version, updated_at)
            VALUES (?1, ?2, ?3, 1, ?4)
            ON CONFLICT(namespace, key) DO UPDATE SET
                value = excluded.value,
                version = ledger_state.version + 1,
                updated_at = excluded.updated_at
            "#,
            params![namespace.storage_name(), key, value, self.timestamp],
        )?;
        Ok(())
    }

    fn scan_prefix(
        &self,
        namespace: &Namespace,
        prefix: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value FROM ledger_state
             WHERE namespace = ?1 AND key >= ?2 AND (?3 IS NULL OR key < ?3)
             ORDER BY key ASC",
        )?;
        let rows = stmt
            .query_map(
                params![namespace.storage_name(), prefix, prefix_upper_bound(prefix)],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn last_key(&self, namespace: &Namespace, prefix: &str) -> Result<Option<String>, LedgerError> {
        let key = self
            .conn
            .query_row(
                "SELECT key FROM ledger_state
                 WHERE namespace = ?1 AND key >= ?2 AND (?3 IS NULL OR key < ?3)
                 ORDER BY key DESC LIMIT 1",
                params![namespace.storage_name(), prefix, prefix_upper_bound(prefix)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(key)
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Smallest key above every key that starts with `prefix`, so prefix scans
/// become a range on the primary key. `None` means unbounded.
fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = char::from_u32(u32::from(last) + 1) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}
