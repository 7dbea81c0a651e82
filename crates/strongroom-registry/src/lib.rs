//! Strongroom portfolio registry
//!
//! Record lifecycle ([`registry`]), the vesting placeholder ([`vesting`]) and
//! [`PortfolioService`], the facade through which every operation runs.
//!
//! ```no_run
//! use strongroom_core::{CallContext, RegistryConfig};
//! use strongroom_registry::{NewPortfolio, PortfolioService};
//! use strongroom_store::MemoryStore;
//!
//! let service = PortfolioService::new(MemoryStore::new(), RegistryConfig::default());
//! let alice = CallContext::new("alice", 0);
//! let id = service.create(&alice, NewPortfolio::new("Vault1", 100, &["btc"]))?;
//! assert!(service.get_details(&alice, id).is_ok());
//! # Ok::<(), strongroom_core::RegistryError>(())
//! ```

pub mod registry;
pub mod service;
pub mod vesting;

pub use registry::NewPortfolio;
pub use service::PortfolioService;
pub use strongroom_authorization::EngageRequest;
pub use vesting::PhaseSpec;
