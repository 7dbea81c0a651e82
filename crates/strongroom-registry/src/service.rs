//! Boundary facade
//!
//! `PortfolioService` exposes every registry, access, lock, locksmith,
//! lockdown and vesting operation. Mutating calls run inside one ledger
//! transaction each, so a failure anywhere discards every write of that call.

use strongroom_authorization::{access, lockdown, locksmith, timelock, AccessPolicy, EngageRequest};
use strongroom_core::{
    ActorId, CallContext, GlobalState, LedgerState, LedgerStore, PortfolioId, PortfolioRecord,
    RegistryConfig, RegistryResult, Tick, TimeLock,
};
use strongroom_store::Ledger;
use tracing::instrument;

use crate::registry::{self, NewPortfolio};
use crate::vesting::{self, PhaseSpec};

/// Registry service over a transactional store
#[derive(Debug)]
pub struct PortfolioService<S: LedgerStore> {
    ledger: Ledger<S>,
    policy: AccessPolicy,
    config: RegistryConfig,
}

impl<S: LedgerStore> PortfolioService<S> {
    /// Build a service over `store` with the administrator and defaults from `config`
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self {
            ledger: Ledger::new(store),
            policy: AccessPolicy::new(config.administrator.clone()),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Authorization policy in force
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    // Registry

    /// Register a portfolio owned by the caller
    #[instrument(level = "debug", skip(self, input), fields(name = %input.name))]
    pub fn create(&self, ctx: &CallContext, input: NewPortfolio) -> RegistryResult<PortfolioId> {
        self.ledger
            .execute("create", |state| registry::create(state, ctx, input))
    }

    /// Record details, subject to the view check
    #[instrument(level = "debug", skip(self))]
    pub fn get_details(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
    ) -> RegistryResult<PortfolioRecord> {
        self.ledger
            .read(|state| registry::get_details(&self.policy, state, ctx, id))
    }

    /// Replace metadata. Owner only.
    #[instrument(level = "debug", skip(self, metadata))]
    pub fn update_metadata(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        metadata: String,
    ) -> RegistryResult<()> {
        self.ledger.execute("update_metadata", |state| {
            registry::update_metadata(&self.policy, state, ctx, id, metadata)
        })
    }

    /// Reassign the owner without an owner check
    #[instrument(level = "debug", skip(self))]
    pub fn transfer_ownership(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        new_owner: ActorId,
    ) -> RegistryResult<()> {
        self.ledger.execute("transfer_ownership", |state| {
            registry::transfer_ownership(&self.policy, state, ctx, id, new_owner)
        })
    }

    /// Reassign the owner. Owner only.
    #[instrument(level = "debug", skip(self))]
    pub fn secure_transfer_ownership(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        new_owner: ActorId,
    ) -> RegistryResult<()> {
        self.ledger.execute("secure_transfer_ownership", |state| {
            registry::secure_transfer_ownership(&self.policy, state, ctx, id, new_owner)
        })
    }

    /// Delete a record. Administrator only.
    #[instrument(level = "debug", skip(self))]
    pub fn administrative_removal(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
    ) -> RegistryResult<PortfolioRecord> {
        self.ledger.execute("administrative_removal", |state| {
            registry::administrative_removal(&self.policy, state, ctx, id)
        })
    }

    /// Number of portfolios ever created
    pub fn total_count(&self) -> u64 {
        self.ledger.read(|state| registry::total_count(state))
    }

    /// Whether a record exists at `id`
    pub fn exists(&self, id: PortfolioId) -> bool {
        self.ledger.read(|state| registry::exists(state, id))
    }

    /// Whether `actor` owns `id`
    pub fn external_ownership_validation(
        &self,
        id: PortfolioId,
        actor: &ActorId,
    ) -> RegistryResult<bool> {
        self.ledger.read(|state| {
            registry::validate_external_ownership(&self.policy, state, id, actor)
        })
    }

    // Access control

    /// Whether `actor` may view `id`
    pub fn can_view(&self, id: PortfolioId, actor: &ActorId) -> bool {
        self.ledger
            .read(|state| access::can_view(&self.policy, state, id, actor))
    }

    /// Grant `viewer` read access. Owner only.
    #[instrument(level = "debug", skip(self))]
    pub fn grant_view_access(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        viewer: ActorId,
    ) -> RegistryResult<()> {
        self.ledger.execute("grant_view_access", |state| {
            access::grant_view(&self.policy, state, ctx, id, viewer)
        })
    }

    /// Withdraw any grant `viewer` holds. Owner only.
    #[instrument(level = "debug", skip(self))]
    pub fn revoke_view_access(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        viewer: &ActorId,
    ) -> RegistryResult<()> {
        self.ledger.execute("revoke_view_access", |state| {
            access::revoke_view(&self.policy, state, ctx, id, viewer)
        })
    }

    // Time-locks

    /// Engage a lock, returning the unlock tick
    #[instrument(level = "debug", skip(self))]
    pub fn engage_timelock(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        request: EngageRequest,
    ) -> RegistryResult<Tick> {
        self.ledger.execute("engage_timelock", |state| {
            timelock::engage(&self.policy, state, ctx, id, request)
        })
    }

    /// Engage a lock for the configured default duration
    pub fn engage_default(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        lock_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> RegistryResult<Tick> {
        let request = EngageRequest::new(self.config.default_lock_duration, lock_type, reason);
        self.engage_timelock(ctx, id, request)
    }

    /// Release the active lock. Initiator or administrator only.
    #[instrument(level = "debug", skip(self))]
    pub fn release_timelock(&self, ctx: &CallContext, id: PortfolioId) -> RegistryResult<()> {
        self.ledger.execute("release_timelock", |state| {
            timelock::release(&self.policy, state, ctx, id)
        })
    }

    /// Lock entry for `id`, subject to the view check
    pub fn lock_status(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
    ) -> RegistryResult<Option<TimeLock>> {
        self.ledger
            .read(|state| timelock::lock_status(&self.policy, state, ctx, id))
    }

    /// Whether a lock is in effect at the caller's tick
    pub fn is_locked(&self, ctx: &CallContext, id: PortfolioId) -> RegistryResult<bool> {
        self.ledger
            .read(|state| timelock::is_locked(&self.policy, state, id, ctx.tick))
    }

    /// Ticks left on the lock at the caller's tick
    pub fn remaining_duration(&self, ctx: &CallContext, id: PortfolioId) -> u64 {
        self.ledger
            .read(|state| timelock::remaining_duration(state, id, ctx.tick))
    }

    // Locksmiths

    /// Delegate lock authority. Owner only.
    #[instrument(level = "debug", skip(self))]
    pub fn authorize_locksmith(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        delegate: ActorId,
        level: u8,
    ) -> RegistryResult<()> {
        self.ledger.execute("authorize_locksmith", |state| {
            locksmith::authorize(&self.policy, state, ctx, id, delegate, level)
        })
    }

    /// Remove a delegation. Owner only.
    #[instrument(level = "debug", skip(self))]
    pub fn revoke_locksmith_authorization(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        delegate: &ActorId,
    ) -> RegistryResult<()> {
        self.ledger.execute("revoke_locksmith_authorization", |state| {
            locksmith::revoke(&self.policy, state, ctx, id, delegate)
        })
    }

    /// Whether `actor` may engage a lock on `id`
    pub fn verify_locksmith_authorization(&self, id: PortfolioId, actor: &ActorId) -> bool {
        self.ledger.read(|state| {
            locksmith::verify_locksmith_authorization(&self.policy, state, id, actor)
        })
    }

    // Lockdown

    /// Engage the emergency lockdown. Administrator only.
    #[instrument(level = "debug", skip(self))]
    pub fn activate_lockdown(&self, ctx: &CallContext) -> RegistryResult<()> {
        self.ledger.execute("activate_lockdown", |state| {
            lockdown::activate(&self.policy, state, ctx)
        })
    }

    /// Clear the emergency lockdown. Administrator only.
    #[instrument(level = "debug", skip(self))]
    pub fn deactivate_lockdown(&self, ctx: &CallContext) -> RegistryResult<()> {
        self.ledger.execute("deactivate_lockdown", |state| {
            lockdown::deactivate(&self.policy, state, ctx)
        })
    }

    // Vesting

    /// Check a vesting schedule. Nothing is persisted.
    #[instrument(level = "debug", skip(self, phases), fields(phases = phases.len()))]
    pub fn create_vesting_schedule(
        &self,
        ctx: &CallContext,
        id: PortfolioId,
        phases: &[PhaseSpec],
    ) -> RegistryResult<usize> {
        self.ledger.read(|state| {
            vesting::create_schedule(&self.policy, state, ctx, id, phases)
        })
    }

    // Introspection

    /// Snapshot of the global scalars. `default_lock_duration` is the effective
    /// value: 144 unless the config overrides it.
    pub fn global_state(&self) -> GlobalState {
        self.ledger.read(|state| GlobalState {
            portfolio_count: state.portfolio_count(),
            emergency_lockdown_active: state.emergency_lockdown(),
            default_lock_duration: self.config.default_lock_duration,
        })
    }

    /// Copy of the full persisted layout
    pub fn export(&self) -> S::State
    where
        S::State: Clone,
    {
        self.ledger.read(|state| state.clone())
    }

    /// Consume the service, returning the store
    pub fn into_store(self) -> S {
        self.ledger.into_inner()
    }
}
