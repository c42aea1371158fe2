//! In-memory tree of store values
//!
//! A plain JSON tree addressed by slash paths. The tree knows nothing
//! about shapes; validation happens in the store facade before any
//! mutation reaches it.

use serde_json::{Map, Value};

use crate::path;

/// The raw value tree.
#[derive(Debug, Clone)]
pub struct Tree {
    root: Value,
}

impl Tree {
    /// An empty tree (the root is an empty object).
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Returns the subtree at a path, `None` if absent.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path::segments(path) {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Replaces the subtree at a path, creating intermediate objects.
    ///
    /// A non-object intermediate on the way down is replaced by an
    /// object; the caller has validated the write, so the old leaf was
    /// addressed at the wrong depth.
    pub fn set(&mut self, path: &str, value: Value) {
        let segments = path::segments(path);

        let Some((last, parents)) = segments.split_last() else {
            self.root = value;
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            // Just ensured the object form above.
            current = current
                .as_object_mut()
                .expect("intermediate is an object")
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current
            .as_object_mut()
            .expect("parent is an object")
            .insert(last.to_string(), value);
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
