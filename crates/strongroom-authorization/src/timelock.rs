//! Per-portfolio time-locks
//!
//! Each portfolio is either Unlocked or Locked. A lock is in effect iff its
//! entry is active and the current tick is before its unlock tick. `engage` is
//! the only way in; `release` and the passage of time are the only ways out.
//! Expiry changes the evaluated state without touching stored data.

use serde::{Deserialize, Serialize};
use strongroom_core::validation::{validate_duration, validate_lock_type, validate_text};
use strongroom_core::{
    ActorId, CallContext, LedgerState, PortfolioId, RegistryError, RegistryResult, Tick, TimeLock,
};

use crate::access::can_view;
use crate::lockdown::ensure_not_locked_down;
use crate::locksmith::verify_locksmith_authorization;
use crate::policy::AccessPolicy;

/// Parameters for engaging a lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngageRequest {
    /// Lock length in ticks, must be positive
    pub duration: u64,
    /// Classification, at most 32 characters
    pub lock_type: String,
    /// Reason, at most 128 characters
    pub reason: String,
    /// Identity nominated for emergency unlock
    #[serde(default)]
    pub emergency_unlock: Option<ActorId>,
}

impl EngageRequest {
    /// Request with no emergency unlock identity
    pub fn new(duration: u64, lock_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            duration,
            lock_type: lock_type.into(),
            reason: reason.into(),
            emergency_unlock: None,
        }
    }

    /// Nominate an emergency unlock identity
    pub fn with_emergency_unlock(mut self, actor: impl Into<ActorId>) -> Self {
        self.emergency_unlock = Some(actor.into());
        self
    }
}

fn in_effect<S>(state: &S, id: PortfolioId, now: Tick) -> bool
where
    S: LedgerState + ?Sized,
{
    state.time_lock(id).is_some_and(|lock| lock.in_effect(now))
}

/// Engage a lock on `id`, returning the unlock tick
pub fn engage<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    request: EngageRequest,
) -> RegistryResult<Tick>
where
    S: LedgerState + ?Sized,
{
    policy.require_portfolio(state, id)?;
    if !verify_locksmith_authorization(policy, state, id, &ctx.caller) {
        tracing::warn!(portfolio_id = %id, caller = %ctx.caller, "lock engagement denied");
        return Err(RegistryError::unauthorized(format!(
            "{} may not lock {id}",
            ctx.caller
        )));
    }
    if in_effect(state, id, ctx.tick) {
        return Err(RegistryError::duplicate_entry(format!("{id} is already locked")));
    }
    validate_duration(request.duration)?;
    validate_lock_type(&request.lock_type)?;
    validate_text("reason", &request.reason)?;
    ensure_not_locked_down(state, "lock engagement")?;

    let unlock_tick = ctx
        .tick
        .checked_add(request.duration)
        .ok_or_else(|| RegistryError::size_validation("lock duration overflows the clock"))?;

    state.put_time_lock(
        id,
        TimeLock {
            active: true,
            unlock_tick,
            lock_type: request.lock_type,
            initiator: ctx.caller.clone(),
            emergency_unlock: request.emergency_unlock,
            reason: request.reason,
        },
    );
    tracing::debug!(
        portfolio_id = %id,
        caller = %ctx.caller,
        tick = %ctx.tick,
        unlock_tick = %unlock_tick,
        "time-lock engaged"
    );
    Ok(unlock_tick)
}

/// Release the active lock on `id`. Initiator or administrator only.
pub fn release<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    let mut lock = state
        .time_lock(id)
        .filter(|lock| lock.active)
        .cloned()
        .ok_or_else(|| RegistryError::not_found(format!("no active lock on {id}")))?;

    if lock.initiator != ctx.caller && !policy.is_administrator(&ctx.caller) {
        tracing::warn!(portfolio_id = %id, caller = %ctx.caller, "lock release denied");
        return Err(RegistryError::unauthorized(format!(
            "{} may not release the lock on {id}",
            ctx.caller
        )));
    }

    lock.active = false;
    state.put_time_lock(id, lock);
    tracing::debug!(
        portfolio_id = %id,
        caller = %ctx.caller,
        tick = %ctx.tick,
        "time-lock released"
    );
    Ok(())
}

/// Whether a lock is in effect on `id`. `NotFound` if the portfolio is absent.
pub fn is_locked<S>(
    policy: &AccessPolicy,
    state: &S,
    id: PortfolioId,
    now: Tick,
) -> RegistryResult<bool>
where
    S: LedgerState + ?Sized,
{
    policy.require_portfolio(state, id)?;
    Ok(in_effect(state, id, now))
}

/// Ticks until the lock on `id` lapses; zero when there is none. Never errors.
pub fn remaining_duration<S>(state: &S, id: PortfolioId, now: Tick) -> u64
where
    S: LedgerState + ?Sized,
{
    state.time_lock(id).map_or(0, |lock| lock.remaining(now))
}

/// Full lock entry for `id`, subject to the same view check as portfolio details
pub fn lock_status<S>(
    policy: &AccessPolicy,
    state: &S,
    ctx: &CallContext,
    id: PortfolioId,
) -> RegistryResult<Option<TimeLock>>
where
    S: LedgerState + ?Sized,
{
    policy.require_portfolio(state, id)?;
    if !can_view(policy, state, id, &ctx.caller) {
        return Err(RegistryError::view_permissions(format!(
            "{} may not view {id}",
            ctx.caller
        )));
    }
    Ok(state.time_lock(id).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lockdown, locksmith};
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use strongroom_core::{LedgerTables, PortfolioRecord};

    const VAULT: PortfolioId = PortfolioId(1);

    fn setup() -> (AccessPolicy, LedgerTables) {
        let mut tables = LedgerTables::new();
        tables.put_portfolio(PortfolioRecord {
            id: VAULT,
            name: "Vault1".to_string(),
            owner: ActorId::from("alice"),
            size: 100,
            created_at: Tick(0),
            metadata: String::new(),
            tags: vec!["btc".to_string()],
        });
        (AccessPolicy::new("admin"), tables)
    }

    fn cold(duration: u64) -> EngageRequest {
        EngageRequest::new(duration, "cold", "audit")
    }

    #[test]
    fn engage_sets_unlock_tick_and_expires() {
        let (policy, mut tables) = setup();
        let alice = CallContext::new("alice", 100);

        let unlock = engage(&policy, &mut tables, &alice, VAULT, cold(10)).unwrap();
        assert_eq!(unlock, Tick(110));
        assert!(is_locked(&policy, &tables, VAULT, Tick(100)).unwrap());
        assert_eq!(remaining_duration(&tables, VAULT, Tick(100)), 10);
        assert_eq!(remaining_duration(&tables, VAULT, Tick(109)), 1);
        assert!(!is_locked(&policy, &tables, VAULT, Tick(110)).unwrap());
        assert_eq!(remaining_duration(&tables, VAULT, Tick(110)), 0);
    }

    #[test]
    fn double_engage_is_duplicate() {
        let (policy, mut tables) = setup();
        let alice = CallContext::new("alice", 0);
        engage(&policy, &mut tables, &alice, VAULT, cold(10)).unwrap();
        assert_matches!(
            engage(&policy, &mut tables, &alice.at(5), VAULT, cold(10)),
            Err(RegistryError::DuplicateEntry { .. })
        );
        // expired lock is overwritten
        assert_eq!(
            engage(&policy, &mut tables, &alice.at(10), VAULT, cold(3)).unwrap(),
            Tick(13)
        );
    }

    #[test]
    fn zero_duration_rejected() {
        let (policy, mut tables) = setup();
        assert_matches!(
            engage(&policy, &mut tables, &CallContext::new("alice", 0), VAULT, cold(0)),
            Err(RegistryError::SizeValidation { .. })
        );
    }

    #[test]
    fn engage_check_order() {
        let (policy, mut tables) = setup();
        let bob = CallContext::new("bob", 0);
        assert_matches!(
            engage(&policy, &mut tables, &bob, PortfolioId(7), cold(0)),
            Err(RegistryError::NotFound { .. })
        );
        assert_matches!(
            engage(&policy, &mut tables, &bob, VAULT, cold(0)),
            Err(RegistryError::UnauthorizedAccess { .. })
        );
    }

    #[test]
    fn oversized_text_rejected() {
        let (policy, mut tables) = setup();
        let alice = CallContext::new("alice", 0);
        let long_type = EngageRequest::new(5, "x".repeat(33), "audit");
        assert_matches!(
            engage(&policy, &mut tables, &alice, VAULT, long_type),
            Err(RegistryError::SizeValidation { .. })
        );
        let long_reason = EngageRequest::new(5, "cold", "r".repeat(129));
        assert_matches!(
            engage(&policy, &mut tables, &alice, VAULT, long_reason),
            Err(RegistryError::SizeValidation { .. })
        );
    }

    #[test]
    fn duration_overflow_rejected() {
        let (policy, mut tables) = setup();
        let alice = CallContext::new("alice", u64::MAX - 1);
        assert_matches!(
            engage(&policy, &mut tables, &alice, VAULT, cold(5)),
            Err(RegistryError::SizeValidation { .. })
        );
    }

    #[test]
    fn lockdown_blocks_engage() {
        let (policy, mut tables) = setup();
        lockdown::activate(&policy, &mut tables, &CallContext::new("admin", 0)).unwrap();
        assert_matches!(
            engage(&policy, &mut tables, &CallContext::new("alice", 0), VAULT, cold(5)),
            Err(RegistryError::AdminPrivileges { .. })
        );
    }

    #[test]
    fn locksmith_and_admin_may_engage() {
        let (policy, mut tables) = setup();
        let alice = CallContext::new("alice", 0);
        locksmith::authorize(&policy, &mut tables, &alice, VAULT, ActorId::from("carol"), 2)
            .unwrap();

        let carol = CallContext::new("carol", 0);
        engage(&policy, &mut tables, &carol, VAULT, cold(5)).unwrap();
        assert_eq!(tables.time_lock(VAULT).unwrap().initiator, ActorId::from("carol"));

        let admin = CallContext::new("admin", 5);
        engage(&policy, &mut tables, &admin, VAULT, cold(5)).unwrap();
    }

    #[test]
    fn release_rules() {
        let (policy, mut tables) = setup();
        let alice = CallContext::new("alice", 0);
        assert_matches!(
            release(&policy, &mut tables, &alice, VAULT),
            Err(RegistryError::NotFound { .. })
        );

        engage(&policy, &mut tables, &alice, VAULT, cold(50)).unwrap();
        assert_matches!(
            release(&policy, &mut tables, &CallContext::new("bob", 1), VAULT),
            Err(RegistryError::UnauthorizedAccess { .. })
        );

        release(&policy, &mut tables, &alice.at(1), VAULT).unwrap();
        assert!(!is_locked(&policy, &tables, VAULT, Tick(1)).unwrap());
        assert_eq!(remaining_duration(&tables, VAULT, Tick(1)), 0);
        assert_matches!(
            release(&policy, &mut tables, &alice.at(2), VAULT),
            Err(RegistryError::NotFound { .. })
        );
    }

    #[test]
    fn admin_releases_any_lock() {
        let (policy, mut tables) = setup();
        engage(&policy, &mut tables, &CallContext::new("alice", 0), VAULT, cold(50)).unwrap();
        release(&policy, &mut tables, &CallContext::new("admin", 1), VAULT).unwrap();
        assert!(!tables.time_lock(VAULT).unwrap().active);
    }

    #[test]
    fn status_requires_view() {
        let (policy, mut tables) = setup();
        let alice = CallContext::new("alice", 0);
        assert_eq!(lock_status(&policy, &tables, &alice, VAULT).unwrap(), None);

        engage(&policy, &mut tables, &alice, VAULT, cold(5).with_emergency_unlock("admin"))
            .unwrap();
        let status = lock_status(&policy, &tables, &alice, VAULT).unwrap().unwrap();
        assert_eq!(status.emergency_unlock, Some(ActorId::from("admin")));

        assert_matches!(
            lock_status(&policy, &tables, &CallContext::new("bob", 0), VAULT),
            Err(RegistryError::ViewPermissions { .. })
        );
        assert_matches!(
            is_locked(&policy, &tables, PortfolioId(3), Tick(0)),
            Err(RegistryError::NotFound { .. })
        );
        assert_eq!(remaining_duration(&tables, PortfolioId(3), Tick(0)), 0);
    }

    proptest! {
        #[test]
        fn remaining_counts_down_to_zero(
            start in 0u64..1_000,
            duration in 1u64..1_000,
            offset in 0u64..3_000,
        ) {
            let (policy, mut tables) = setup();
            let alice = CallContext::new("alice", start);
            engage(&policy, &mut tables, &alice, VAULT, cold(duration)).unwrap();

            let now = Tick(start + offset);
            let remaining = remaining_duration(&tables, VAULT, now);
            prop_assert_eq!(remaining, duration.saturating_sub(offset));
            prop_assert_eq!(is_locked(&policy, &tables, VAULT, now).unwrap(), remaining > 0);
        }
    }
}
