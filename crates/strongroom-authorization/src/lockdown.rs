//! Global emergency lockdown
//!
//! While engaged, ownership transfers and new lock engagements fail with
//! `AdminPrivileges`. Reads and administrative removal are unaffected.

use strongroom_core::{CallContext, LedgerState, RegistryError, RegistryResult};

use crate::policy::AccessPolicy;

fn set<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    active: bool,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    if !policy.is_administrator(&ctx.caller) {
        tracing::warn!(caller = %ctx.caller, active, "lockdown toggle denied");
        return Err(RegistryError::admin_privileges(format!(
            "{} is not the administrator",
            ctx.caller
        )));
    }
    state.set_emergency_lockdown(active);
    tracing::info!(active, tick = %ctx.tick, "emergency lockdown updated");
    Ok(())
}

/// Engage the emergency lockdown. Administrator only.
pub fn activate<S>(policy: &AccessPolicy, state: &mut S, ctx: &CallContext) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    set(policy, state, ctx, true)
}

/// Clear the emergency lockdown. Administrator only.
pub fn deactivate<S>(policy: &AccessPolicy, state: &mut S, ctx: &CallContext) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    set(policy, state, ctx, false)
}

/// Fail with `AdminPrivileges` while the lockdown is engaged
pub fn ensure_not_locked_down<S>(state: &S, operation: &str) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    if state.emergency_lockdown() {
        return Err(RegistryError::admin_privileges(format!(
            "{operation} blocked by emergency lockdown"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strongroom_core::LedgerTables;

    #[test]
    fn only_admin_toggles() {
        let policy = AccessPolicy::new("admin");
        let mut tables = LedgerTables::new();

        assert_matches!(
            activate(&policy, &mut tables, &CallContext::new("alice", 1)),
            Err(RegistryError::AdminPrivileges { .. })
        );
        activate(&policy, &mut tables, &CallContext::new("admin", 1)).unwrap();
        assert!(tables.emergency_lockdown());
        assert_matches!(
            ensure_not_locked_down(&tables, "transfer"),
            Err(RegistryError::AdminPrivileges { .. })
        );

        deactivate(&policy, &mut tables, &CallContext::new("admin", 2)).unwrap();
        assert!(ensure_not_locked_down(&tables, "transfer").is_ok());
    }
}
