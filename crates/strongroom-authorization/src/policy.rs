//! Identity predicates shared by every gate
//!
//! The policy knows the designated administrator; everything else it reads
//! from the ledger tables passed in.

use strongroom_core::validation::is_administrator;
use strongroom_core::{
    ActorId, LedgerState, PortfolioId, PortfolioRecord, RegistryError, RegistryResult,
};

/// Administrator identity plus the existence and ownership checks built on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    administrator: ActorId,
}

impl AccessPolicy {
    /// Policy with the given designated administrator
    pub fn new(administrator: impl Into<ActorId>) -> Self {
        Self {
            administrator: administrator.into(),
        }
    }

    /// Designated administrator
    pub fn administrator(&self) -> &ActorId {
        &self.administrator
    }

    /// Whether `actor` is the designated administrator
    pub fn is_administrator(&self, actor: &ActorId) -> bool {
        is_administrator(actor, &self.administrator)
    }

    /// Portfolio by id, or `NotFound`
    pub fn require_portfolio<'s, S>(
        &self,
        state: &'s S,
        id: PortfolioId,
    ) -> RegistryResult<&'s PortfolioRecord>
    where
        S: LedgerState + ?Sized,
    {
        state
            .portfolio(id)
            .ok_or_else(|| RegistryError::not_found(format!("{id} does not exist")))
    }

    /// Portfolio owned by `caller`: `NotFound`, then `OwnerVerification`
    pub fn require_owner<'s, S>(
        &self,
        state: &'s S,
        id: PortfolioId,
        caller: &ActorId,
    ) -> RegistryResult<&'s PortfolioRecord>
    where
        S: LedgerState + ?Sized,
    {
        let record = self.require_portfolio(state, id)?;
        if &record.owner != caller {
            tracing::warn!(portfolio_id = %id, caller = %caller, "owner verification failed");
            return Err(RegistryError::owner_verification(format!(
                "{caller} does not own {id}"
            )));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strongroom_core::{LedgerTables, Tick};

    fn seeded() -> LedgerTables {
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

    #[test]
    fn owner_check_orders_not_found_first() {
        let policy = AccessPolicy::new("admin");
        let tables = seeded();
        let bob = ActorId::from("bob");
        assert_matches!(
            policy.require_owner(&tables, PortfolioId(2), &bob),
            Err(RegistryError::NotFound { .. })
        );
        assert_matches!(
            policy.require_owner(&tables, PortfolioId(1), &bob),
            Err(RegistryError::OwnerVerification { .. })
        );
        assert!(policy
            .require_owner(&tables, PortfolioId(1), &ActorId::from("alice"))
            .is_ok());
    }

    #[test]
    fn administrator_is_not_owner() {
        let policy = AccessPolicy::new("admin");
        let tables = seeded();
        assert!(policy.is_administrator(&ActorId::from("admin")));
        assert_matches!(
            policy.require_owner(&tables, PortfolioId(1), &ActorId::from("admin")),
            Err(RegistryError::OwnerVerification { .. })
        );
    }
}
