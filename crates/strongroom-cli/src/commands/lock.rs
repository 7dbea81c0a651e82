//! `strongroom lock`

use std::io::Write;

use anyhow::Result;
use strongroom_core::{ActorId, CallContext, LedgerStore, PortfolioId};
use strongroom_registry::{EngageRequest, PortfolioService};

/// Arguments of `strongroom lock`
#[derive(Debug, Clone)]
pub struct LockArgs {
    /// Portfolio id
    pub id: u64,
    /// Engaging actor
    pub actor: String,
    /// Current tick
    pub tick: u64,
    /// Explicit duration, else the configured default
    pub duration: Option<u64>,
    /// Lock category label
    pub lock_type: String,
    /// Free-form reason
    pub reason: String,
    /// Emergency unlocker identity
    pub emergency_unlock: Option<String>,
}

/// Engage the lock and print the unlock tick
pub fn execute<S: LedgerStore>(
    service: &PortfolioService<S>,
    args: LockArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let ctx = CallContext::new(args.actor, args.tick);
    let id = PortfolioId(args.id);
    let duration = args
        .duration
        .unwrap_or(service.config().default_lock_duration);

    let mut request = EngageRequest::new(duration, args.lock_type, args.reason);
    request.emergency_unlock = args.emergency_unlock.map(ActorId::from);

    let unlock = service.engage_timelock(&ctx, id, request)?;
    writeln!(out, "{id} locked until {unlock}")?;
    Ok(())
}
