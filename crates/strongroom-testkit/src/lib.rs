//! Strongroom test support
//!
//! Shared by the integration tests of every strongroom crate:
//!
//! - [`actors`]: well-known identities
//! - [`Harness`]: an in-memory service with a movable current tick
//! - [`strategies`]: proptest strategies for valid and invalid inputs

pub mod actors;
pub mod harness;
pub mod strategies;

pub use harness::Harness;
