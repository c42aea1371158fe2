//! arbordb - A strict, schema-validated tree store core
//!
//! Canonical shape descriptors, path-template resolution, and write
//! validation for a tree-shaped key-value store backing a multiplayer
//! strategy game.

pub mod cli;
pub mod model;
pub mod observability;
pub mod path;
pub mod schema;
pub mod stats;
pub mod store;
