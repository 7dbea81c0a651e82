//! Registry configuration
//!
//! Loaded from a TOML file, then overridden by `STRONGROOM_*` environment
//! variables, then validated.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::identifiers::ActorId;
use crate::types::DEFAULT_LOCK_DURATION;

const ENV_PREFIX: &str = "STRONGROOM_";

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or malformed
    #[error("Invalid config value for {key}: {message}")]
    Invalid {
        /// Offending key
        key: String,
        /// What is wrong with it
        message: String,
    },
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Designated administrator identity
    pub administrator: ActorId,
    /// Lock duration used when a caller does not give one
    pub default_lock_duration: u64,
    /// Snapshot file for the file-backed store; in-memory when absent
    pub store_path: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            administrator: ActorId::new("admin"),
            default_lock_duration: DEFAULT_LOCK_DURATION,
            store_path: None,
        }
    }
}

impl RegistryConfig {
    /// Config with the given administrator and defaults elsewhere
    pub fn with_administrator(administrator: impl Into<ActorId>) -> Self {
        Self {
            administrator: administrator.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Merge `STRONGROOM_*` variables from the process environment
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge `STRONGROOM_*` variables from the given pairs
    pub fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(name) = key.strip_prefix(ENV_PREFIX) {
                self.set_from_string(&name.to_lowercase(), &value)?;
            }
        }
        Ok(())
    }

    /// Set a single value by key; unknown keys are ignored
    pub fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "administrator" => self.administrator = ActorId::new(value),
            "default_lock_duration" => {
                self.default_lock_duration =
                    value.parse().map_err(|e| ConfigError::Invalid {
                        key: key.to_string(),
                        message: format!("{e}"),
                    })?;
            }
            "store_path" => self.store_path = Some(PathBuf::from(value)),
            _ => tracing::debug!(key, "ignoring unknown config key"),
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.administrator.as_str().is_empty() {
            return Err(ConfigError::Invalid {
                key: "administrator".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.default_lock_duration == 0 {
            return Err(ConfigError::Invalid {
                key: "default_lock_duration".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
