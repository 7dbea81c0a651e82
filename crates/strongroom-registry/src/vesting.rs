//! Vesting schedules (placeholder)
//!
//! Accepts a schedule after the owner and shape checks but persists nothing
//! and gates nothing. Phased release needs its own design before this grows
//! any behavior.

use serde::{Deserialize, Serialize};
use strongroom_authorization::AccessPolicy;
use strongroom_core::{
    ActorId, CallContext, LedgerState, PortfolioId, RegistryError, RegistryResult, Tick,
};

/// One requested phase of a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpec {
    /// Share released in this phase
    pub percentage: u8,
    /// Tick at which the phase would unlock
    pub unlock_tick: Tick,
    /// Recipient of the share
    pub beneficiary: ActorId,
}

/// Check a schedule for `id`. Owner only; the phase list must be non-empty.
///
/// Returns the number of phases accepted. No vesting rows are written.
pub fn create_schedule<S>(
    policy: &AccessPolicy,
    state: &S,
    ctx: &CallContext,
    id: PortfolioId,
    phases: &[PhaseSpec],
) -> RegistryResult<usize>
where
    S: LedgerState + ?Sized,
{
    policy.require_owner(state, id, &ctx.caller)?;
    if phases.is_empty() {
        return Err(RegistryError::tag_validation("vesting schedule needs at least one phase"));
    }
    tracing::debug!(portfolio_id = %id, phases = phases.len(), "vesting schedule accepted");
    Ok(phases.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strongroom_core::{LedgerTables, PortfolioRecord};

    fn tables() -> LedgerTables {
        let mut tables = LedgerTables::new();
        tables.put_portfolio(PortfolioRecord {
            id: PortfolioId(1),
            name: "Vault1".to_string(),
            owner: ActorId::from("alice"),
            size: 100,
            created_at: Tick(0),
            metadata: String::new(),
            tags: vec!["btc".to_string()],
        });
        tables
    }

    fn phase() -> PhaseSpec {
        PhaseSpec {
            percentage: 50,
            unlock_tick: Tick(100),
            beneficiary: ActorId::from("bob"),
        }
    }

    #[test]
    fn accepts_without_writing() {
        let policy = AccessPolicy::new("admin");
        let tables = tables();
        let alice = CallContext::new("alice", 0);
        let accepted =
            create_schedule(&policy, &tables, &alice, PortfolioId(1), &[phase(), phase()]).unwrap();
        assert_eq!(accepted, 2);
        assert_eq!(tables.vesting_phase(PortfolioId(1), 0), None);
    }

    #[test]
    fn rejects_in_order() {
        let policy = AccessPolicy::new("admin");
        let tables = tables();
        assert_matches!(
            create_schedule(&policy, &tables, &CallContext::new("alice", 0), PortfolioId(2), &[]),
            Err(RegistryError::NotFound { .. })
        );
        assert_matches!(
            create_schedule(&policy, &tables, &CallContext::new("bob", 0), PortfolioId(1), &[]),
            Err(RegistryError::OwnerVerification { .. })
        );
        assert_matches!(
            create_schedule(&policy, &tables, &CallContext::new("alice", 0), PortfolioId(1), &[]),
            Err(RegistryError::TagValidation { .. })
        );
    }
}
