//! `strongroom`: operate a portfolio registry from the command line

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use strongroom_cli::{dispatch, load_config, Command};

#[derive(Parser)]
#[command(name = "strongroom")]
#[command(about = "Strongroom - portfolio registry with time-locks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "strongroom.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli.config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(config, cli.command, &mut out)
}
