//! CLI argument definitions using clap
//!
//! Commands:
//! - arbordb validate --path <store-path> <file.json>
//! - arbordb check-config <file.json>
//! - arbordb shapes

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// arbordb - A strict, schema-validated tree store core
#[derive(Parser, Debug)]
#[command(name = "arbordb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON document against the shape registered for a store path
    Validate {
        /// Store path the document is destined for (e.g. /stats/u1)
        #[arg(long)]
        path: String,

        /// JSON file holding the candidate document
        file: PathBuf,

        /// Tolerate undeclared fields
        #[arg(long)]
        lenient: bool,

        /// Report every mismatch instead of the first
        #[arg(long)]
        all: bool,
    },

    /// Validate a GameConfig document, structure and cross-field coherence
    CheckConfig {
        /// JSON file holding the GameConfig document
        file: PathBuf,
    },

    /// List the registered path templates and their shapes
    Shapes,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
