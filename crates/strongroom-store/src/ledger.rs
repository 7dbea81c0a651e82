//! Single-writer atomic executor
//!
//! A `Ledger` serializes every call behind one mutex and wraps each mutating
//! call in a store transaction, reproducing the all-or-nothing semantics of a
//! totally ordered ledger.

use parking_lot::{Mutex, MutexGuard};
use strongroom_core::{LedgerStore, RegistryResult};

/// Owns a store and runs operations against it atomically
#[derive(Debug)]
pub struct Ledger<S: LedgerStore> {
    store: Mutex<S>,
}

/// Open transaction; rolls back on drop unless committed
struct Transaction<'a, S: LedgerStore> {
    store: MutexGuard<'a, S>,
    open: bool,
}

impl<'a, S: LedgerStore> Transaction<'a, S> {
    fn begin(mut store: MutexGuard<'a, S>) -> RegistryResult<Self> {
        store.begin()?;
        Ok(Self { store, open: true })
    }

    fn commit(mut self) -> RegistryResult<()> {
        self.open = false;
        self.store.commit()?;
        Ok(())
    }
}

impl<S: LedgerStore> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        if self.open {
            self.store.rollback();
        }
    }
}

impl<S: LedgerStore> Ledger<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Run `f` in a transaction: commit on `Ok`, roll back on `Err` or panic
    pub fn execute<T, F>(&self, operation: &'static str, f: F) -> RegistryResult<T>
    where
        F: FnOnce(&mut S::State) -> RegistryResult<T>,
    {
        let mut txn = Transaction::begin(self.store.lock())?;
        match f(txn.store.state_mut()) {
            Ok(value) => {
                txn.commit()?;
                Ok(value)
            }
            Err(err) => {
                drop(txn);
                tracing::debug!(operation, code = err.code(), kind = err.kind(), "rolled back");
                Err(err)
            }
        }
    }

    /// Run a read-only closure against current state
    pub fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&S::State) -> T,
    {
        let store = self.store.lock();
        f(store.state())
    }

    /// Run a closure against the store itself, e.g. to export a snapshot
    pub fn with_store<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let store = self.store.lock();
        f(&store)
    }

    /// Consume the ledger, returning the store
    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }
}
