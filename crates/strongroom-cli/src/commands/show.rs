//! `strongroom show`

use std::io::Write;

use anyhow::Result;
use strongroom_core::{CallContext, LedgerStore, PortfolioId};
use strongroom_registry::PortfolioService;

/// Print a record and its lock through the normal view checks
pub fn execute<S: LedgerStore>(
    service: &PortfolioService<S>,
    id: u64,
    actor: &str,
    tick: u64,
    out: &mut dyn Write,
) -> Result<()> {
    let ctx = CallContext::new(actor, tick);
    let id = PortfolioId(id);

    let record = service.get_details(&ctx, id)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;

    match service.lock_status(&ctx, id)? {
        Some(lock) if lock.in_effect(ctx.tick) => writeln!(
            out,
            "locked until {} ({} remaining) by {}: {} / {}",
            lock.unlock_tick,
            service.remaining_duration(&ctx, id),
            lock.initiator,
            lock.lock_type,
            lock.reason
        )?,
        Some(_) => writeln!(out, "unlocked (previous lock lapsed or released)")?,
        None => writeln!(out, "unlocked (never locked)")?,
    }
    Ok(())
}
