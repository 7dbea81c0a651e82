//! File-backed ledger store
//!
//! Holds the tables in memory and writes a JSON snapshot on every commit. The
//! snapshot is written to a sibling temp file and renamed into place, so a
//! crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::path::{Path, PathBuf};

use strongroom_core::{LedgerStore, LedgerTables, StoreError};

use crate::memory::MemoryStore;

/// Store persisting a JSON snapshot of the tables on commit
#[derive(Debug)]
pub struct FileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl FileStore {
    /// Open the snapshot at `path`, starting empty if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let bytes = fs::read(&path)?;
            serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?
        } else {
            LedgerTables::new()
        };
        tracing::debug!(path = %path.display(), "opened ledger snapshot");
        Ok(Self {
            inner: MemoryStore::with_tables(tables),
            path,
        })
    }

    /// Snapshot location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current tables
    pub fn tables(&self) -> &LedgerTables {
        self.inner.tables()
    }

    fn write_snapshot(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.inner.tables)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LedgerStore for FileStore {
    type State = LedgerTables;

    fn begin(&mut self) -> Result<(), StoreError> {
        self.inner.begin()
    }

    fn state(&self) -> &LedgerTables {
        self.inner.state()
    }

    fn state_mut(&mut self) -> &mut LedgerTables {
        self.inner.state_mut()
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if !self.inner.in_transaction() {
            return Err(StoreError::Transaction("commit without begin".into()));
        }
        if let Err(err) = self.write_snapshot() {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "snapshot write failed, rolling back"
            );
            self.inner.rollback();
            return Err(err);
        }
        self.inner.commit()
    }

    fn rollback(&mut self) {
        self.inner.rollback();
    }

    fn in_transaction(&self) -> bool {
        self.inner.in_transaction()
    }
}
