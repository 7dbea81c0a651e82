//! Operation scripts
//!
//! A script is a TOML file of `[[step]]` tables. Each step names the caller,
//! the tick and the operation with its arguments:
//!
//! ```toml
//! [[step]]
//! caller = "alice"
//! tick = 0
//! op = "create"
//! name = "Vault1"
//! size = 100
//! tags = ["btc"]
//! ```

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use strongroom_core::{
    ActorId, CallContext, LedgerStore, PortfolioId, PortfolioRecord, RegistryError,
    RegistryResult, Tick, TimeLock,
};
use strongroom_registry::{EngageRequest, NewPortfolio, PhaseSpec, PortfolioService};

/// Parsed script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    /// Steps in execution order
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    /// Read and parse a script file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid script {}", path.display()))
    }

    /// Parse script text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// One call against the service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    /// Invoking actor
    pub caller: ActorId,
    /// Current tick for the call
    #[serde(default)]
    pub tick: u64,
    /// Operation and arguments
    #[serde(flatten)]
    pub op: Operation,
}

/// Every boundary operation, tagged by `op`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Operation {
    Create {
        name: String,
        size: u64,
        #[serde(default)]
        metadata: String,
        tags: Vec<String>,
    },
    GetDetails {
        id: PortfolioId,
    },
    UpdateMetadata {
        id: PortfolioId,
        metadata: String,
    },
    TransferOwnership {
        id: PortfolioId,
        new_owner: ActorId,
    },
    SecureTransferOwnership {
        id: PortfolioId,
        new_owner: ActorId,
    },
    GrantViewAccess {
        id: PortfolioId,
        viewer: ActorId,
    },
    RevokeViewAccess {
        id: PortfolioId,
        viewer: ActorId,
    },
    AdministrativeRemoval {
        id: PortfolioId,
    },
    TotalCount,
    Exists {
        id: PortfolioId,
    },
    ExternalOwnershipValidation {
        id: PortfolioId,
        actor: ActorId,
    },
    /// Uses the configured default duration when `duration` is absent
    EngageTimelock {
        id: PortfolioId,
        duration: Option<u64>,
        lock_type: String,
        reason: String,
        emergency_unlock: Option<ActorId>,
    },
    ReleaseTimelock {
        id: PortfolioId,
    },
    ActivateLockdown,
    DeactivateLockdown,
    AuthorizeLocksmith {
        id: PortfolioId,
        delegate: ActorId,
        level: u8,
    },
    RevokeLocksmithAuthorization {
        id: PortfolioId,
        delegate: ActorId,
    },
    CreateVestingSchedule {
        id: PortfolioId,
        phases: Vec<PhaseSpec>,
    },
    LockStatus {
        id: PortfolioId,
    },
    IsLocked {
        id: PortfolioId,
    },
    RemainingDuration {
        id: PortfolioId,
    },
}

impl Operation {
    /// Script name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::GetDetails { .. } => "get-details",
            Self::UpdateMetadata { .. } => "update-metadata",
            Self::TransferOwnership { .. } => "transfer-ownership",
            Self::SecureTransferOwnership { .. } => "secure-transfer-ownership",
            Self::GrantViewAccess { .. } => "grant-view-access",
            Self::RevokeViewAccess { .. } => "revoke-view-access",
            Self::AdministrativeRemoval { .. } => "administrative-removal",
            Self::TotalCount => "total-count",
            Self::Exists { .. } => "exists",
            Self::ExternalOwnershipValidation { .. } => "external-ownership-validation",
            Self::EngageTimelock { .. } => "engage-timelock",
            Self::ReleaseTimelock { .. } => "release-timelock",
            Self::ActivateLockdown => "activate-lockdown",
            Self::DeactivateLockdown => "deactivate-lockdown",
            Self::AuthorizeLocksmith { .. } => "authorize-locksmith",
            Self::RevokeLocksmithAuthorization { .. } => "revoke-locksmith-authorization",
            Self::CreateVestingSchedule { .. } => "create-vesting-schedule",
            Self::LockStatus { .. } => "lock-status",
            Self::IsLocked { .. } => "is-locked",
            Self::RemainingDuration { .. } => "remaining-duration",
        }
    }
}

/// Successful result of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Operation returns nothing
    Done,
    /// New portfolio id
    Id(PortfolioId),
    /// Portfolio record
    Record(Box<PortfolioRecord>),
    /// Yes/no query
    Flag(bool),
    /// Counter or duration
    Count(u64),
    /// Unlock tick
    Tick(Tick),
    /// Lock entry, if any
    Lock(Option<TimeLock>),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "ok"),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

/// Outcome of one executed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Position in the script, from 1
    pub index: usize,
    /// Invoking actor
    pub caller: ActorId,
    /// Tick of the call
    pub tick: Tick,
    /// Operation name
    pub op: &'static str,
    /// Result or error
    pub result: RegistryResult<Output>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {} @ {}: ", self.index, self.op, self.caller, self.tick)?;
        match &self.result {
            Ok(output) => write!(f, "{output}"),
            Err(err) => write!(f, "error {} ({}) {err}", err.code(), err.kind()),
        }
    }
}

/// Apply one step to the service
pub fn apply<S: LedgerStore>(
    service: &PortfolioService<S>,
    step: &Step,
) -> Result<Output, RegistryError> {
    let ctx = CallContext::new(step.caller.clone(), step.tick);
    let output = match step.op.clone() {
        Operation::Create {
            name,
            size,
            metadata,
            tags,
        } => Output::Id(service.create(
            &ctx,
            NewPortfolio {
                name,
                size,
                metadata,
                tags,
            },
        )?),
        Operation::GetDetails { id } => Output::Record(Box::new(service.get_details(&ctx, id)?)),
        Operation::UpdateMetadata { id, metadata } => {
            service.update_metadata(&ctx, id, metadata)?;
            Output::Done
        }
        Operation::TransferOwnership { id, new_owner } => {
            service.transfer_ownership(&ctx, id, new_owner)?;
            Output::Done
        }
        Operation::SecureTransferOwnership { id, new_owner } => {
            service.secure_transfer_ownership(&ctx, id, new_owner)?;
            Output::Done
        }
        Operation::GrantViewAccess { id, viewer } => {
            service.grant_view_access(&ctx, id, viewer)?;
            Output::Done
        }
        Operation::RevokeViewAccess { id, viewer } => {
            service.revoke_view_access(&ctx, id, &viewer)?;
            Output::Done
        }
        Operation::AdministrativeRemoval { id } => {
            Output::Record(Box::new(service.administrative_removal(&ctx, id)?))
        }
        Operation::TotalCount => Output::Count(service.total_count()),
        Operation::Exists { id } => Output::Flag(service.exists(id)),
        Operation::ExternalOwnershipValidation { id, actor } => {
            Output::Flag(service.external_ownership_validation(id, &actor)?)
        }
        Operation::EngageTimelock {
            id,
            duration,
            lock_type,
            reason,
            emergency_unlock,
        } => {
            let duration = duration.unwrap_or(service.config().default_lock_duration);
            let mut request = EngageRequest::new(duration, lock_type, reason);
            request.emergency_unlock = emergency_unlock;
            Output::Tick(service.engage_timelock(&ctx, id, request)?)
        }
        Operation::ReleaseTimelock { id } => {
            service.release_timelock(&ctx, id)?;
            Output::Done
        }
        Operation::ActivateLockdown => {
            service.activate_lockdown(&ctx)?;
            Output::Done
        }
        Operation::DeactivateLockdown => {
            service.deactivate_lockdown(&ctx)?;
            Output::Done
        }
        Operation::AuthorizeLocksmith {
            id,
            delegate,
            level,
        } => {
            service.authorize_locksmith(&ctx, id, delegate, level)?;
            Output::Done
        }
        Operation::RevokeLocksmithAuthorization { id, delegate } => {
            service.revoke_locksmith_authorization(&ctx, id, &delegate)?;
            Output::Done
        }
        Operation::CreateVestingSchedule { id, phases } => {
            let accepted = service.create_vesting_schedule(&ctx, id, &phases)?;
            Output::Count(accepted as u64)
        }
        Operation::LockStatus { id } => Output::Lock(service.lock_status(&ctx, id)?),
        Operation::IsLocked { id } => Output::Flag(service.is_locked(&ctx, id)?),
        Operation::RemainingDuration { id } => Output::Count(service.remaining_duration(&ctx, id)),
    };
    Ok(output)
}

/// Run every step in order. Failed steps are reported, not fatal.
pub fn run<S: LedgerStore>(service: &PortfolioService<S>, script: &Script) -> Vec<StepReport> {
    script
        .steps
        .iter()
        .enumerate()
        .map(|(n, step)| StepReport {
            index: n + 1,
            caller: step.caller.clone(),
            tick: Tick(step.tick),
            op: step.op.name(),
            result: apply(service, step),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_tagged_steps() {
        let script = Script::parse(
            r#"
            [[step]]
            caller = "alice"
            op = "create"
            name = "Vault1"
            size = 100
            tags = ["btc"]

            [[step]]
            caller = "alice"
            tick = 3
            op = "engage-timelock"
            id = 1
            lock_type = "cold"
            reason = "audit"
            "#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[0].tick, 0);
        assert_eq!(script.steps[0].op.name(), "create");
        assert_matches!(
            &script.steps[1].op,
            Operation::EngageTimelock { id: PortfolioId(1), duration: None, .. }
        );
    }

    #[test]
    fn unknown_op_is_rejected() {
        let result = Script::parse("[[step]]\ncaller = \"alice\"\nop = \"explode\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn report_shows_code_and_kind() {
        let report = StepReport {
            index: 2,
            caller: ActorId::from("bob"),
            tick: Tick(4),
            op: "get-details",
            result: Err(RegistryError::view_permissions("bob may not view portfolio-1")),
        };
        let line = report.to_string();
        assert!(line.starts_with("#2 get-details bob @ tick-4: error 406 (view-permissions)"));
    }
}
