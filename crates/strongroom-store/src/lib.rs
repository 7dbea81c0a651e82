//! Strongroom store backends
//!
//! - [`MemoryStore`]: tables in memory, checkpoint rollback. Used by tests and
//!   by embedders that persist elsewhere.
//! - [`FileStore`]: a `MemoryStore` that writes a JSON snapshot on commit.
//! - [`Ledger`]: the single-writer executor that gives every operation
//!   all-or-nothing semantics over either backend.

pub mod file;
pub mod ledger;
pub mod memory;

pub use file::FileStore;
pub use ledger::Ledger;
pub use memory::MemoryStore;
