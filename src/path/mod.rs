//! Path subsystem for arbordb
//!
//! Store nodes are addressed by slash-separated paths. Schema locations
//! are addressed by path templates mixing literal segments with bound
//! identifier segments (`/stats/{uid}/history/{id}`).
//!
//! # Design Principles
//!
//! - Templates are parsed once into tagged segments, never re-interpolated
//! - Matching is structural, not string-based
//! - Concrete paths carry no escaping; a segment is any non-empty,
//!   slash-free string

mod template;

pub use template::{Bindings, PathTemplate, Segment, TemplateError};

/// Splits a concrete path into its segments.
///
/// The root path `/` (or the empty string) has zero segments. Leading and
/// trailing slashes are tolerated; empty interior segments are not
/// produced.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
