//! Observability subsystem for arbordb
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation or writes
//! 3. No async or background threads
//! 4. Deterministic output

mod logger;

pub use logger::{Logger, Severity};
