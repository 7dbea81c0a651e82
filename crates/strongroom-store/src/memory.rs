//! In-memory ledger store
//!
//! `begin` clones the tables into a checkpoint; `rollback` restores it.

use strongroom_core::{LedgerStore, LedgerTables, StoreError};

/// In-memory store with checkpoint rollback
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub(crate) tables: LedgerTables,
    checkpoint: Option<LedgerTables>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing tables
    pub fn with_tables(tables: LedgerTables) -> Self {
        Self {
            tables,
            checkpoint: None,
        }
    }

    /// Current tables
    pub fn tables(&self) -> &LedgerTables {
        &self.tables
    }

    /// Consume the store, returning its tables
    pub fn into_tables(self) -> LedgerTables {
        self.tables
    }
}

impl LedgerStore for MemoryStore {
    type State = LedgerTables;

    fn begin(&mut self) -> Result<(), StoreError> {
        if self.checkpoint.is_some() {
            return Err(StoreError::Transaction("transaction already open".into()));
        }
        self.checkpoint = Some(self.tables.clone());
        Ok(())
    }

    fn state(&self) -> &LedgerTables {
        &self.tables
    }

    fn state_mut(&mut self) -> &mut LedgerTables {
        &mut self.tables
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        match self.checkpoint.take() {
            Some(_) => Ok(()),
            None => Err(StoreError::Transaction("commit without begin".into())),
        }
    }

    fn rollback(&mut self) {
        if let Some(checkpoint) = self.checkpoint.take() {
            self.tables = checkpoint;
        }
    }

    fn in_transaction(&self) -> bool {
        self.checkpoint.is_some()
    }
}
