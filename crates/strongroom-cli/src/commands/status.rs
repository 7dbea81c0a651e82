//! `strongroom status`

use std::io::Write;

use anyhow::Result;
use strongroom_core::LedgerStore;
use strongroom_registry::PortfolioService;

/// Print the global scalars
pub fn execute<S: LedgerStore>(service: &PortfolioService<S>, out: &mut dyn Write) -> Result<()> {
    let global = service.global_state();
    writeln!(out, "administrator:         {}", service.policy().administrator())?;
    writeln!(out, "portfolios created:    {}", global.portfolio_count)?;
    writeln!(
        out,
        "emergency lockdown:    {}",
        if global.emergency_lockdown_active { "active" } else { "inactive" }
    )?;
    writeln!(out, "default lock duration: {}", global.default_lock_duration)?;
    Ok(())
}
