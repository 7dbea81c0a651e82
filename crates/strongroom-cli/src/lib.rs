//! Strongroom command-line front end
//!
//! Library half of the `strongroom` binary, kept separate so the command
//! handlers can be driven from tests.

pub mod commands;
pub mod config;
pub mod script;

pub use commands::{dispatch, Command};
pub use config::load_config;
