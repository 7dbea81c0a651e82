//! Persisted record types
//!
//! These are the rows of the five ledger tables plus the global scalars.

use serde::{Deserialize, Serialize};

use crate::identifiers::{ActorId, PortfolioId, Tick};

/// Default lock duration in ticks
pub const DEFAULT_LOCK_DURATION: u64 = 144;

/// Tracked descriptor of a digital asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    /// Sequential id, starting at 1
    pub id: PortfolioId,
    /// Display name, 1 to 64 characters
    pub name: String,
    /// Current owner
    pub owner: ActorId,
    /// Declared size, 1 to 1,000,000
    pub size: u64,
    /// Tick at creation
    pub created_at: Tick,
    /// Free-form metadata, at most 128 characters
    pub metadata: String,
    /// Ordered tags, 1 to 10 entries
    pub tags: Vec<String>,
}

/// Explicit view grant for a (portfolio, viewer) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Whether the grant is in force
    pub granted: bool,
}

/// Per-portfolio time-lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLock {
    /// Set on engagement, cleared on release
    pub active: bool,
    /// First tick at which the lock no longer applies
    pub unlock_tick: Tick,
    /// Caller-supplied lock classification, at most 32 characters
    pub lock_type: String,
    /// Identity that engaged the lock
    pub initiator: ActorId,
    /// Optional identity nominated for emergency unlock
    pub emergency_unlock: Option<ActorId>,
    /// Free-form reason, at most 128 characters
    pub reason: String,
}

impl TimeLock {
    /// A lock is in effect iff it is active and has not yet reached its unlock tick
    pub fn in_effect(&self, now: Tick) -> bool {
        self.active && now < self.unlock_tick
    }

    /// Ticks left before the lock lapses, zero when not in effect
    pub fn remaining(&self, now: Tick) -> u64 {
        if self.in_effect(now) {
            now.until(self.unlock_tick)
        } else {
            0
        }
    }
}

/// Delegated authority to engage locks on a portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocksmithGrant {
    /// Whether the delegation is in force
    pub active: bool,
    /// Authorization level, 0 to 5. Persisted but not consulted by any gate.
    pub level: u8,
}

/// One phase of a vesting schedule (reserved; never written by the stub)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingPhase {
    /// Share released in this phase
    pub percentage: u8,
    /// Tick at which the phase unlocks
    pub unlock_tick: Tick,
    /// Whether the phase is live
    pub active: bool,
    /// Recipient of the released share
    pub beneficiary: ActorId,
}

/// Snapshot of the global scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Number of portfolios ever created
    pub portfolio_count: u64,
    /// Whether the emergency lockdown is engaged
    pub emergency_lockdown_active: bool,
    /// Lock duration used when none is given
    pub default_lock_duration: u64,
}
