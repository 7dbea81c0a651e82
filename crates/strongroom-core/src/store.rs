//! Transactional store trait
//!
//! Every public operation runs as one all-or-nothing unit: `begin`, then reads
//! and writes through [`LedgerStore::state_mut`], then `commit` on success or
//! `rollback` on any error. Implementations live in `strongroom-store`.

use crate::state::LedgerState;

/// Errors raised by a persistence backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// `begin` while a transaction is open, or commit/rollback without one
    #[error("Transaction misuse: {0}")]
    Transaction(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Backend holding the ledger tables with begin/commit/rollback semantics
pub trait LedgerStore: Send {
    /// Table view the operations run against
    type State: LedgerState;

    /// Open a transaction, checkpointing current state
    fn begin(&mut self) -> Result<(), StoreError>;

    /// Read-only view of current state
    fn state(&self) -> &Self::State;

    /// Mutable view of current state; writes are provisional until `commit`
    fn state_mut(&mut self) -> &mut Self::State;

    /// Make the open transaction durable. On error the store has rolled back.
    fn commit(&mut self) -> Result<(), StoreError>;

    /// Discard every write since `begin`
    fn rollback(&mut self);

    /// Whether a transaction is open
    fn in_transaction(&self) -> bool;
}
