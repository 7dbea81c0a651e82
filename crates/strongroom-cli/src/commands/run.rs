//! `strongroom run`

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use strongroom_core::LedgerStore;
use strongroom_registry::PortfolioService;

use crate::script::{self, Script};

/// Replay `path` against `service`, one report line per step
pub fn execute<S: LedgerStore>(
    service: &PortfolioService<S>,
    path: &Path,
    strict: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let script = Script::load(path)?;
    tracing::info!(path = %path.display(), steps = script.steps.len(), "running script");

    let reports = script::run(service, &script);
    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    for report in &reports {
        writeln!(out, "{report}")?;
    }
    writeln!(out, "{} steps, {failed} failed", reports.len())?;

    if strict && failed > 0 {
        bail!("{failed} step(s) failed");
    }
    Ok(())
}
