//! Store wrapper for exercising failure paths in unit tests.

use super::{Namespace, SqliteStore, Transaction, TransactionalStore};
use crate::errors::LedgerError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Delegates to a [`SqliteStore`], refusing writes to one namespace and
/// counting rows returned by `scan_prefix`.
#[derive(Clone)]
pub(crate) struct FaultyStore {
    inner: SqliteStore,
    refuse_writes_to: Option<Namespace>,
    scanned_rows: Arc<AtomicUsize>,
}

impl FaultyStore {
    pub(crate) fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            refuse_writes_to: None,
            scanned_rows: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn refusing_writes_to(mut self, namespace: Namespace) -> Self {
        self.refuse_writes_to = Some(namespace);
        self
    }

    pub(crate) fn scanned_rows(&self) -> usize {
        self.scanned_rows.load(Ordering::SeqCst)
    }
}

impl TransactionalStore for FaultyStore {
    fn transact<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, LedgerError>,
    {
        self.inner.transact(|txn| {
            let mut faulty = FaultyTxn {
                inner: txn,
                refuse_writes_to: self.refuse_writes_to.as_ref(),
                scanned_rows: self.scanned_rows.as_ref(),
            };
            f(&mut faulty)
        })
    }

    fn view<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&dyn Transaction) -> Result<T, LedgerError>,
    {
        self.inner.view(f)
    }
}

struct FaultyTxn<'a> {
    inner: &'a mut dyn Transaction,
    refuse_writes_to: Option<&'a Namespace>,
    scanned_rows: &'a AtomicUsize,
}

impl Transaction for FaultyTxn<'_> {
    fn get(&self, namespace: &Namespace, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.get(namespace, key)
    }

    fn put(&mut self, namespace: &Namespace, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        if self.refuse_writes_to == Some(namespace) {
            return Err(LedgerError::Persistence(format!(
                "write to {namespace} refused"
            )));
        }
        self.inner.put(namespace, key, value)
    }

    fn scan_prefix(
        &self,
        namespace: &Namespace,
        prefix: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let rows = self.inner.scan_prefix(namespace, prefix)?;
        self.scanned_rows.fetch_add(rows.len(), Ordering::SeqCst);
        Ok(rows)
    }

    fn last_key(&self, namespace: &Namespace, prefix: &str) -> Result<Option<String>, LedgerError> {
        self.inner.last_key(namespace, prefix)
    }

    fn timestamp(&self) -> i64 {
        self.inner.timestamp()
    }
}
