//! Config loading for the CLI

use std::path::Path;

use anyhow::Context;
use strongroom_core::RegistryConfig;

/// Load `path` if present, apply `STRONGROOM_*` overrides, then validate
pub fn load_config(path: &Path) -> anyhow::Result<RegistryConfig> {
    let mut config = if path.exists() {
        RegistryConfig::load_from_file(path)?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        RegistryConfig::default()
    };
    config
        .merge_with_env()
        .context("invalid STRONGROOM_* environment override")?;
    config.validate()?;
    Ok(config)
}
