//! Shape/Validator subsystem for arbordb
//!
//! The store is a tree of nodes addressed by slash paths; every node's
//! structure is declared once as a shape descriptor keyed by a path
//! template. Writes are validated against the resolved shape before they
//! are accepted.
//!
//! # Design Principles
//!
//! - Registry built once at startup, immutable afterwards
//! - Validation is a pure function of (path, value)
//! - No nulls, defaults, or coercion
//! - Violations are reported, never repaired
//! - Deterministic validation

mod builtin;
mod constraints;
mod errors;
mod registry;
mod types;
mod validator;

pub use constraints::{ConstraintOutcome, ConstraintSet};
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationDetails};
pub use registry::{Resolution, ShapeRegistry};
pub use types::{parse_datetime, FieldDef, FieldType, MapKey, Shape};
pub use validator::Validator;
