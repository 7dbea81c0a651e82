//! Ledger table abstraction
//!
//! `LedgerState` is the typed view every operation reads and writes. It covers
//! exactly the five persisted tables and the two global scalars. `LedgerTables`
//! is the canonical in-memory implementation; store backends wrap it and add
//! transactional behavior (see [`crate::store::LedgerStore`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::identifiers::{ActorId, PortfolioId};
use crate::types::{AccessGrant, LocksmithGrant, PortfolioRecord, TimeLock, VestingPhase};

/// Typed access to the persisted tables
pub trait LedgerState {
    /// Portfolio by id
    fn portfolio(&self, id: PortfolioId) -> Option<&PortfolioRecord>;
    /// Insert or replace a portfolio
    fn put_portfolio(&mut self, record: PortfolioRecord);
    /// Delete a portfolio, returning it if present
    fn remove_portfolio(&mut self, id: PortfolioId) -> Option<PortfolioRecord>;

    /// View grant for (portfolio, viewer)
    fn access_grant(&self, id: PortfolioId, viewer: &ActorId) -> Option<AccessGrant>;
    /// Insert or replace a view grant
    fn put_access_grant(&mut self, id: PortfolioId, viewer: ActorId, grant: AccessGrant);
    /// Delete a view grant, returning whether one existed
    fn remove_access_grant(&mut self, id: PortfolioId, viewer: &ActorId) -> bool;

    /// Lock entry for a portfolio
    fn time_lock(&self, id: PortfolioId) -> Option<&TimeLock>;
    /// Insert or replace a lock entry
    fn put_time_lock(&mut self, id: PortfolioId, lock: TimeLock);

    /// Locksmith delegation for (portfolio, delegate)
    fn locksmith_grant(&self, id: PortfolioId, delegate: &ActorId) -> Option<LocksmithGrant>;
    /// Insert or replace a locksmith delegation
    fn put_locksmith_grant(&mut self, id: PortfolioId, delegate: ActorId, grant: LocksmithGrant);
    /// Delete a locksmith delegation, returning whether one existed
    fn remove_locksmith_grant(&mut self, id: PortfolioId, delegate: &ActorId) -> bool;

    /// Vesting phase for (portfolio, phase index)
    fn vesting_phase(&self, id: PortfolioId, phase: u32) -> Option<&VestingPhase>;

    /// Number of portfolios ever created
    fn portfolio_count(&self) -> u64;
    /// Overwrite the portfolio counter
    fn set_portfolio_count(&mut self, count: u64);

    /// Whether the emergency lockdown is engaged
    fn emergency_lockdown(&self) -> bool;
    /// Engage or clear the emergency lockdown
    fn set_emergency_lockdown(&mut self, active: bool);
}

/// The persisted layout: five tables and two scalars
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTables {
    portfolios: BTreeMap<PortfolioId, PortfolioRecord>,
    access_grants: BTreeMap<PortfolioId, BTreeMap<ActorId, AccessGrant>>,
    time_locks: BTreeMap<PortfolioId, TimeLock>,
    locksmith_grants: BTreeMap<PortfolioId, BTreeMap<ActorId, LocksmithGrant>>,
    vesting_phases: BTreeMap<PortfolioId, BTreeMap<u32, VestingPhase>>,
    portfolio_count: u64,
    emergency_lockdown_active: bool,
}

impl LedgerTables {
    /// Empty tables
    pub fn new() -> Self {
        Self::default()
    }
}

fn remove_nested<V>(
    table: &mut BTreeMap<PortfolioId, BTreeMap<ActorId, V>>,
    id: PortfolioId,
    actor: &ActorId,
) -> bool {
    let Some(inner) = table.get_mut(&id) else {
        return false;
    };
    let removed = inner.remove(actor).is_some();
    if inner.is_empty() {
        table.remove(&id);
    }
    removed
}

impl LedgerState for LedgerTables {
    fn portfolio(&self, id: PortfolioId) -> Option<&PortfolioRecord> {
        self.portfolios.get(&id)
    }

    fn put_portfolio(&mut self, record: PortfolioRecord) {
        self.portfolios.insert(record.id, record);
    }

    fn remove_portfolio(&mut self, id: PortfolioId) -> Option<PortfolioRecord> {
        self.portfolios.remove(&id)
    }

    fn access_grant(&self, id: PortfolioId, viewer: &ActorId) -> Option<AccessGrant> {
        self.access_grants.get(&id)?.get(viewer).copied()
    }

    fn put_access_grant(&mut self, id: PortfolioId, viewer: ActorId, grant: AccessGrant) {
        self.access_grants.entry(id).or_default().insert(viewer, grant);
    }

    fn remove_access_grant(&mut self, id: PortfolioId, viewer: &ActorId) -> bool {
        remove_nested(&mut self.access_grants, id, viewer)
    }

    fn time_lock(&self, id: PortfolioId) -> Option<&TimeLock> {
        self.time_locks.get(&id)
    }

    fn put_time_lock(&mut self, id: PortfolioId, lock: TimeLock) {
        self.time_locks.insert(id, lock);
    }

    fn locksmith_grant(&self, id: PortfolioId, delegate: &ActorId) -> Option<LocksmithGrant> {
        self.locksmith_grants.get(&id)?.get(delegate).copied()
    }

    fn put_locksmith_grant(&mut self, id: PortfolioId, delegate: ActorId, grant: LocksmithGrant) {
        self.locksmith_grants
            .entry(id)
            .or_default()
            .insert(delegate, grant);
    }

    fn remove_locksmith_grant(&mut self, id: PortfolioId, delegate: &ActorId) -> bool {
        remove_nested(&mut self.locksmith_grants, id, delegate)
    }

    fn vesting_phase(&self, id: PortfolioId, phase: u32) -> Option<&VestingPhase> {
        self.vesting_phases.get(&id)?.get(&phase)
    }

    fn portfolio_count(&self) -> u64 {
        self.portfolio_count
    }

    fn set_portfolio_count(&mut self, count: u64) {
        self.portfolio_count = count;
    }

    fn emergency_lockdown(&self) -> bool {
        self.emergency_lockdown_active
    }

    fn set_emergency_lockdown(&mut self, active: bool) {
        self.emergency_lockdown_active = active;
    }
}
