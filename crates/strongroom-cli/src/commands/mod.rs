//! CLI subcommands
//!
//! Each command runs against a `PortfolioService` over whichever store the
//! config selects: the JSON snapshot at `store_path`, or memory.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use strongroom_core::{LedgerStore, RegistryConfig};
use strongroom_registry::PortfolioService;
use strongroom_store::{FileStore, MemoryStore};

pub mod lock;
pub mod run;
pub mod show;
pub mod status;

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a TOML script of operations
    Run {
        /// Script file
        script: PathBuf,

        /// Exit with an error if any step fails
        #[arg(long)]
        strict: bool,
    },

    /// Show the global state
    Status,

    /// Show a portfolio and its lock as seen by an actor
    Show {
        /// Portfolio id
        id: u64,

        /// Actor performing the read
        #[arg(long = "as", value_name = "ACTOR")]
        actor: String,

        /// Current tick
        #[arg(long, default_value_t = 0)]
        tick: u64,
    },

    /// Engage a time-lock on a portfolio
    Lock {
        /// Portfolio id
        id: u64,

        /// Actor engaging the lock
        #[arg(long = "as", value_name = "ACTOR")]
        actor: String,

        /// Current tick
        #[arg(long, default_value_t = 0)]
        tick: u64,

        /// Lock length in ticks; the configured default when omitted
        #[arg(long)]
        duration: Option<u64>,

        /// Lock category label
        #[arg(long)]
        lock_type: String,

        /// Free-form reason
        #[arg(long, default_value = "")]
        reason: String,

        /// Identity recorded as the emergency unlocker
        #[arg(long)]
        emergency_unlock: Option<String>,
    },
}

/// Open the configured store and run `command`, writing output to `out`
pub fn dispatch(config: RegistryConfig, command: Command, out: &mut dyn Write) -> Result<()> {
    match config.store_path.clone() {
        Some(path) => {
            let store = FileStore::open(&path)
                .with_context(|| format!("failed to open store {}", path.display()))?;
            handle(&PortfolioService::new(store, config), command, out)
        }
        None => handle(&PortfolioService::new(MemoryStore::new(), config), command, out),
    }
}

fn handle<S: LedgerStore>(
    service: &PortfolioService<S>,
    command: Command,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Run { script, strict } => run::execute(service, &script, strict, out),
        Command::Status => status::execute(service, out),
        Command::Show { id, actor, tick } => show::execute(service, id, &actor, tick, out),
        Command::Lock {
            id,
            actor,
            tick,
            duration,
            lock_type,
            reason,
            emergency_unlock,
        } => lock::execute(
            service,
            lock::LockArgs {
                id,
                actor,
                tick,
                duration,
                lock_type,
                reason,
                emergency_unlock,
            },
            out,
        ),
    }
}
