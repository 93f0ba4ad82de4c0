//! Record store adapter.
//!
//! The ledger keeps every record in a transactional key-value store split into
//! a public namespace and named private collections. All reads and writes for
//! one ledger operation go through a single [`Transaction`], which commits
//! only if the operation returns `Ok`. Read-only operations use
//! [`TransactionalStore::view`] and never take the write lock.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ PolicyManager / ClaimProcessor / AccessGate              │
//! │        │ transact(|txn| ...) / view(|txn| ...)           │
//! │  ┌─────▼──────────────┐   ┌───────────────────────────┐  │
//! │  │ TransactionalStore │──▶│ ledger_state (SQLite)     │  │
//! │  └────────────────────┘   │  public | private:<name>  │  │
//! │                           └───────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod clock;
mod schema;
mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

pub use clock::{FixedClock, SystemClock, TransactionClock};
pub use schema::LEDGER_SCHEMA;
pub use sqlite::{SqliteStore, DEFAULT_BUSY_TIMEOUT_MS};

use crate::errors::LedgerError;
use std::fmt;

/// Partition of the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// World-readable state.
    Public,
    /// A restricted collection, reachable only through ledger components.
    Private(String),
}

impl Namespace {
    pub fn private(collection: impl Into<String>) -> Self {
        Self::Private(collection.into())
    }

    /// Name under which the namespace is persisted.
    pub fn storage_name(&self) -> String {
        match self {
            Self::Public => "public".to_string(),
            Self::Private(collection) => format!("private:{collection}"),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_name())
    }
}

/// One open unit-of-work against the store.
pub trait Transaction {
    fn get(&self, namespace: &Namespace, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn put(&mut self, namespace: &Namespace, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// All entries whose key starts with `prefix`, in key order.
    fn scan_prefix(
        &self,
        namespace: &Namespace,
        prefix: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;

    /// Greatest key starting with `prefix`. Values are not loaded.
    fn last_key(&self, namespace: &Namespace, prefix: &str) -> Result<Option<String>, LedgerError>;

    /// Transaction time in unix seconds, fixed for the lifetime of the transaction.
    fn timestamp(&self) -> i64;
}

/// A store that can run a closure as one atomic transaction.
pub trait TransactionalStore {
    /// Run `f` in a fresh transaction. Writes are committed when `f` returns
    /// `Ok` and discarded when it returns `Err`.
    fn transact<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, LedgerError>;

    /// Run `f` in a read-only transaction: a consistent snapshot that does
    /// not wait on, or block, concurrent writers.
    fn view<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&dyn Transaction) -> Result<T, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_namespaces_never_collide_with_public() {
        assert_eq!(Namespace::Public.storage_name(), "public");
        assert_eq!(
            Namespace::private("public").storage_name(),
            "private:public"
        );
    }
}
