//! Strongroom core
//!
//! Shared vocabulary for the portfolio registry: identifiers, persisted record
//! types, the unified error type with its numeric codes, stateless validation,
//! per-call context, configuration, and the table/store traits every other
//! crate builds on.
//!
//! Nothing here reads ambient state. The caller identity and current tick
//! arrive in a [`CallContext`]; persistence arrives as a [`LedgerStore`].

pub mod config;
pub mod context;
pub mod errors;
pub mod identifiers;
pub mod state;
pub mod store;
pub mod types;
pub mod validation;

pub use config::{ConfigError, RegistryConfig};
pub use context::CallContext;
pub use errors::{RegistryError, RegistryResult};
pub use identifiers::{ActorId, PortfolioId, Tick};
pub use state::{LedgerState, LedgerTables};
pub use store::{LedgerStore, StoreError};
pub use types::{
    AccessGrant, GlobalState, LocksmithGrant, PortfolioRecord, TimeLock, VestingPhase,
    DEFAULT_LOCK_DURATION,
};
