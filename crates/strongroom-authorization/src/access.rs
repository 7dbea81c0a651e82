//! View access grants
//!
//! A caller may view a portfolio if it owns the portfolio, is the
//! administrator, or holds an explicit grant. A missing grant row evaluates as
//! not granted; evaluation never errors.

use strongroom_core::{
    AccessGrant, ActorId, CallContext, LedgerState, PortfolioId, RegistryResult,
};

use crate::policy::AccessPolicy;

/// Whether `actor` may view portfolio `id`
pub fn can_view<S>(policy: &AccessPolicy, state: &S, id: PortfolioId, actor: &ActorId) -> bool
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
        .access_grant(id, actor)
        .is_some_and(|grant| grant.granted)
}

/// Grant `viewer` read access to portfolio `id`. Owner only.
pub fn grant_view<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    viewer: ActorId,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    policy.require_owner(state, id, &ctx.caller)?;
    tracing::debug!(portfolio_id = %id, viewer = %viewer, tick = %ctx.tick, "view access granted");
    state.put_access_grant(id, viewer, AccessGrant { granted: true });
    Ok(())
}

/// Remove any view grant `viewer` holds on portfolio `id`. Owner only.
pub fn revoke_view<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    viewer: &ActorId,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    policy.require_owner(state, id, &ctx.caller)?;
    let existed = state.remove_access_grant(id, viewer);
    tracing::debug!(portfolio_id = %id, viewer = %viewer, existed, "view access revoked");
    Ok(())
}
