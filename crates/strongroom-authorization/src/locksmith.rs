//! Locksmith delegation
//!
//! An owner may delegate lock-engaging authority to other identities. The
//! stored level (0..=5) is kept for future graduated permissions; today only
//! the presence of an active grant matters.

use strongroom_core::validation::validate_locksmith_level;
use strongroom_core::{
    ActorId, CallContext, LedgerState, LocksmithGrant, PortfolioId, RegistryResult,
};

use crate::policy::AccessPolicy;

/// Delegate lock authority on `id` to `delegate` at `level`. Owner only.
pub fn authorize<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    delegate: ActorId,
    level: u8,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    policy.require_owner(state, id, &ctx.caller)?;
    validate_locksmith_level(level)?;
    tracing::debug!(portfolio_id = %id, delegate = %delegate, level, "locksmith authorized");
    state.put_locksmith_grant(id, delegate, LocksmithGrant { active: true, level });
    Ok(())
}

/// Remove any delegation `delegate` holds on `id`. Owner only; absent rows are fine.
pub fn revoke<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    delegate: &ActorId,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    policy.require_owner(state, id, &ctx.caller)?;
    let existed = state.remove_locksmith_grant(id, delegate);
    tracing::debug!(portfolio_id = %id, delegate = %delegate, existed, "locksmith revoked");
    Ok(())
}

/// Whether `actor` may engage a lock on `id`: owner, administrator or active locksmith
pub fn verify_locksmith_authorization<S>(
    policy: &AccessPolicy,
    state: &S,
    id: PortfolioId,
    actor: &ActorId,
) -> bool
where
    S: LedgerState + ?Sized,
{
    if policy.is_administrator(actor) {
        return true;
    }
    if state.portfolio(id).is_some_and(|record| &record.owner == actor) {
        return true;
    }
    state
        .locksmith_grant(id, actor)
        .is_some_and(|grant| grant.active)
}
