//! Strongroom authorization
//!
//! The gates every registry operation passes through:
//!
//! - [`access`]: composite view permission (owner, administrator, explicit grant)
//! - [`timelock`]: per-portfolio Unlocked/Locked state machine
//! - [`locksmith`]: delegated authority to engage locks
//! - [`lockdown`]: global emergency flag blocking transfers and new locks
//!
//! All functions take the ledger tables explicitly and never commit anything
//! themselves; atomicity is the caller's store transaction.

pub mod access;
pub mod lockdown;
pub mod locksmith;
pub mod policy;
pub mod timelock;

pub use access::can_view;
pub use locksmith::verify_locksmith_authorization;
pub use policy::AccessPolicy;
pub use timelock::EngageRequest;
