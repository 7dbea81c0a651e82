//! Identifier types used across the registry
//!
//! Actors are opaque principals authenticated by the environment. Portfolio ids
//! and ticks are plain integers wrapped so they cannot be confused with each
//! other or with sizes and durations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated principal attributed to a call
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor id from its principal string
    pub fn new(principal: impl Into<String>) -> Self {
        Self(principal.into())
    }

    /// Get the principal string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(principal: &str) -> Self {
        Self::new(principal)
    }
}

impl From<String> for ActorId {
    fn from(principal: String) -> Self {
        Self(principal)
    }
}

/// Portfolio record identifier, assigned sequentially from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioId(pub u64);

impl PortfolioId {
    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one, or `None` once the id space is exhausted
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "portfolio-{}", self.0)
    }
}

impl From<u64> for PortfolioId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Logical clock value supplied by the environment
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Advance by `ticks`, or `None` on overflow
    pub fn checked_add(self, ticks: u64) -> Option<Self> {
        self.0.checked_add(ticks).map(Self)
    }

    /// Ticks from `self` until `later`, zero if `later` is not after `self`
    pub fn until(self, later: Tick) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick-{}", self.0)
    }
}

impl From<u64> for Tick {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
