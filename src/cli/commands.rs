//! CLI command implementations
//!
//! The CLI is a thin client over the shape registry: it never mutates
//! anything, it resolves and validates and prints.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::schema::{ShapeRegistry, Validator};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command.
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate {
            path,
            file,
            lenient,
            all,
        } => validate(&path, &file, lenient, all),
        Command::CheckConfig { file } => check_config(&file),
        Command::Shapes => shapes(),
    }
}

/// `arbordb validate` - check one document against its path's shape.
pub fn validate(path: &str, file: &Path, lenient: bool, all: bool) -> CliResult<()> {
    let value = read_document(file)?;
    let registry = ShapeRegistry::builtin();
    let validator = if lenient {
        Validator::new(&registry).with_unknown_fields_allowed()
    } else {
        Validator::new(&registry)
    };

    if all {
        let errors = validator.validate_all(path, &value);
        if errors.is_empty() {
            println!("OK");
            return Ok(());
        }
        for error in &errors {
            eprintln!("{}", error);
        }
        return Err(CliError::validation_failed(format!(
            "{} mismatch(es) against shape for '{}'",
            errors.len(),
            path
        )));
    }

    match validator.validate(path, &value) {
        Ok(()) => {
            println!("OK");
            Ok(())
        }
        Err(e) => Err(CliError::validation_failed(e.to_string())),
    }
}

/// `arbordb check-config` - full validation of a GameConfig document,
/// the structural pass plus the cross-field coherence checks.
pub fn check_config(file: &Path) -> CliResult<()> {
    let value = read_document(file)?;
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    validator
        .validate("/config/modes/_/config", &value)
        .map_err(|e| CliError::validation_failed(e.to_string()))?;
    println!("OK");
    Ok(())
}

/// `arbordb shapes` - list registered templates.
pub fn shapes() -> CliResult<()> {
    let registry = ShapeRegistry::builtin();
    for (template, shape) in registry.shapes() {
        println!("{}  {}", template, shape.name);
    }
    Ok(())
}

fn read_document(file: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(file)
        .map_err(|e| CliError::input_error(format!("{}: {}", file.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::input_error(format!("{}: {}", file.display(), e)))
}
