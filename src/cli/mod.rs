//! CLI module for arbordb
//!
//! Provides command-line interface for:
//! - validate: check a JSON document against the shape for a store path
//! - check-config: run the GameConfig cross-field checks
//! - shapes: list registered path templates

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, shapes, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
