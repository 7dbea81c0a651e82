//! Portfolio record lifecycle
//!
//! Create, read, update, transfer and remove portfolio records. Ids come from
//! the portfolio counter: dense, strictly increasing, never reused.

use serde::{Deserialize, Serialize};
use strongroom_authorization::lockdown::ensure_not_locked_down;
use strongroom_authorization::{can_view, AccessPolicy};
use strongroom_core::validation::{validate_name, validate_size, validate_tags, validate_text};
use strongroom_core::{
    ActorId, CallContext, LedgerState, PortfolioId, PortfolioRecord, RegistryError, RegistryResult,
};

/// Caller-supplied fields of a new portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPortfolio {
    /// Display name, 1 to 64 characters
    pub name: String,
    /// Declared size, 1 to 1,000,000
    pub size: u64,
    /// Free-form metadata, at most 128 characters
    #[serde(default)]
    pub metadata: String,
    /// 1 to 10 tags
    pub tags: Vec<String>,
}

impl NewPortfolio {
    /// Portfolio with empty metadata
    pub fn new(name: impl Into<String>, size: u64, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            size,
            metadata: String::new(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }
}

/// Register a new portfolio owned by the caller, returning its id
pub fn create<S>(
    state: &mut S,
    ctx: &CallContext,
    input: NewPortfolio,
) -> RegistryResult<PortfolioId>
where
    S: LedgerState + ?Sized,
{
    validate_name(&input.name)?;
    validate_size(input.size)?;
    validate_tags(&input.tags)?;
    validate_text("metadata", &input.metadata)?;

    let id = PortfolioId(state.portfolio_count())
        .next()
        .ok_or_else(|| RegistryError::size_validation("portfolio id space exhausted"))?;
    // Unreachable while ids derive from the counter; kept as a guard.
    if state.portfolio(id).is_some() {
        return Err(RegistryError::duplicate_entry(format!("{id} already exists")));
    }

    state.put_portfolio(PortfolioRecord {
        id,
        name: input.name,
        owner: ctx.caller.clone(),
        size: input.size,
        created_at: ctx.tick,
        metadata: input.metadata,
        tags: input.tags,
    });
    state.set_portfolio_count(id.value());
    tracing::debug!(portfolio_id = %id, owner = %ctx.caller, tick = %ctx.tick, "portfolio created");
    Ok(id)
}

/// Full record, if the caller may view it
pub fn get_details<S>(
    policy: &AccessPolicy,
    state: &S,
    ctx: &CallContext,
    id: PortfolioId,
) -> RegistryResult<PortfolioRecord>
where
    S: LedgerState + ?Sized,
{
    let record = policy.require_portfolio(state, id)?;
    if !can_view(policy, state, id, &ctx.caller) {
        tracing::warn!(portfolio_id = %id, caller = %ctx.caller, "view denied");
        return Err(RegistryError::view_permissions(format!(
            "{} may not view {id}",
            ctx.caller
        )));
    }
    Ok(record.clone())
}

/// Replace the metadata field. Owner only.
pub fn update_metadata<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    metadata: String,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    let mut record = policy.require_owner(state, id, &ctx.caller)?.clone();
    validate_text("metadata", &metadata)?;
    record.metadata = metadata;
    state.put_portfolio(record);
    tracing::debug!(portfolio_id = %id, tick = %ctx.tick, "metadata updated");
    Ok(())
}

fn reassign<S>(state: &mut S, mut record: PortfolioRecord, new_owner: ActorId, ctx: &CallContext)
where
    S: LedgerState + ?Sized,
{
    tracing::debug!(
        portfolio_id = %record.id,
        from = %record.owner,
        to = %new_owner,
        caller = %ctx.caller,
        "ownership transferred"
    );
    record.owner = new_owner;
    state.put_portfolio(record);
}

/// Reassign the owner. Does not check that the caller owns the record.
pub fn transfer_ownership<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    new_owner: ActorId,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    let record = policy.require_portfolio(state, id)?.clone();
    ensure_not_locked_down(state, "ownership transfer")?;
    reassign(state, record, new_owner, ctx);
    Ok(())
}

/// Reassign the owner. Owner only.
pub fn secure_transfer_ownership<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
    new_owner: ActorId,
) -> RegistryResult<()>
where
    S: LedgerState + ?Sized,
{
    let record = policy.require_owner(state, id, &ctx.caller)?.clone();
    ensure_not_locked_down(state, "ownership transfer")?;
    reassign(state, record, new_owner, ctx);
    Ok(())
}

/// Delete a record. Administrator only; grants and locks are left in place.
pub fn administrative_removal<S>(
    policy: &AccessPolicy,
    state: &mut S,
    ctx: &CallContext,
    id: PortfolioId,
) -> RegistryResult<PortfolioRecord>
where
    S: LedgerState + ?Sized,
{
    if !policy.is_administrator(&ctx.caller) {
        tracing::warn!(portfolio_id = %id, caller = %ctx.caller, "administrative removal denied");
        return Err(RegistryError::unauthorized(format!(
            "{} is not the administrator",
            ctx.caller
        )));
    }
    let removed = state
        .remove_portfolio(id)
        .ok_or_else(|| RegistryError::not_found(format!("{id} does not exist")))?;
    tracing::info!(portfolio_id = %id, tick = %ctx.tick, "portfolio removed by administrator");
    Ok(removed)
}

/// Number of portfolios ever created
pub fn total_count<S>(state: &S) -> u64
where
    S: LedgerState + ?Sized,
{
    state.portfolio_count()
}

/// Whether a record currently exists at `id`
pub fn exists<S>(state: &S, id: PortfolioId) -> bool
where
    S: LedgerState + ?Sized,
{
    state.portfolio(id).is_some()
}

/// Whether `actor` owns `id`. `NotFound` if the record is absent.
pub fn validate_external_ownership<S>(
    policy: &AccessPolicy,
    state: &S,
    id: PortfolioId,
    actor: &ActorId,
) -> RegistryResult<bool>
where
    S: LedgerState + ?Sized,
{
    Ok(&policy.require_portfolio(state, id)?.owner == actor)
}
