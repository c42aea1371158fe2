//! Store subsystem for arbordb
//!
//! An in-memory reference backend honoring the tree layout and the
//! get/set/update contract. Every write is resolved against the shape
//! registry and validated before it lands; rejected writes leave the
//! tree untouched. Durable persistence is a separate backend's job.

mod errors;
mod store;
mod tree;

pub use errors::{StoreError, StoreResult};
pub use store::TreeStore;
pub use tree::Tree;
