//! Shape registry: path templates mapped to shape descriptors
//!
//! The registry is built once at startup (builtin shapes, optionally
//! extended from a directory of JSON shape files) and is immutable
//! afterwards. Re-registering a template is an error. Concrete paths
//! resolve to the first template that matches them structurally.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::path::{Bindings, PathTemplate};

use super::builtin::builtin_shapes;
use super::errors::{SchemaError, SchemaResult};
use super::types::Shape;

/// A concrete path resolved against the registry.
#[derive(Debug)]
pub struct Resolution<'a> {
    /// The matching template
    pub template: &'a PathTemplate,
    /// The shape registered for it
    pub shape: &'a Shape,
    /// Identifiers bound while matching
    pub bindings: Bindings,
}

/// On-disk form of one registered shape.
#[derive(Debug, Serialize, Deserialize)]
struct ShapeFile {
    template: String,
    shape: Shape,
}

/// The immutable registry of shape descriptors.
pub struct ShapeRegistry {
    /// Directory containing shape files, when disk-backed
    shape_dir: Option<PathBuf>,
    /// Registered (template, shape) pairs in registration order
    entries: Vec<(PathTemplate, Shape)>,
}

impl ShapeRegistry {
    /// Creates an empty, purely in-memory registry.
    pub fn empty() -> Self {
        Self {
            shape_dir: None,
            entries: Vec::new(),
        }
    }

    /// Creates a registry backed by `<data_dir>/shapes/`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            shape_dir: Some(data_dir.join("shapes")),
            entries: Vec::new(),
        }
    }

    /// Creates a registry pre-populated with the game-store shapes.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (template, shape) in builtin_shapes() {
            // Builtin templates are statically known to parse and to be
            // distinct, so registration cannot fail.
            registry
                .register(template, shape)
                .unwrap_or_else(|e| panic!("builtin shape rejected: {}", e));
        }
        registry
    }

    /// Registers a shape under a path template.
    ///
    /// Fails with ARBOR_SHAPE_IMMUTABLE if the template is already
    /// registered, ARBOR_MALFORMED_SHAPE if the template does not parse.
    pub fn register(&mut self, template: &str, shape: Shape) -> SchemaResult<()> {
        let parsed = PathTemplate::parse(template)
            .map_err(|e| SchemaError::malformed_shape(template, e.to_string()))?;

        if self.entries.iter().any(|(t, _)| t.source() == parsed.source()) {
            return Err(SchemaError::shape_immutable(parsed.source()));
        }

        self.entries.push((parsed, shape));
        Ok(())
    }

    /// Resolves a concrete path to its template, shape and bindings.
    pub fn resolve(&self, path: &str) -> SchemaResult<Resolution<'_>> {
        for (template, shape) in &self.entries {
            if let Some(bindings) = template.matches(path) {
                return Ok(Resolution {
                    template,
                    shape,
                    bindings,
                });
            }
        }
        Err(SchemaError::unknown_path(path))
    }

    /// Resolves a concrete path to its shape descriptor.
    pub fn shape_for(&self, path: &str) -> SchemaResult<&Shape> {
        self.resolve(path).map(|r| r.shape)
    }

    /// Iterates registered (template, shape) pairs in registration order.
    pub fn shapes(&self) -> impl Iterator<Item = (&PathTemplate, &Shape)> {
        self.entries.iter().map(|(t, s)| (t, s))
    }

    /// Number of registered templates.
    pub fn template_count(&self) -> usize {
        self.entries.len()
    }

    /// Loads all shape files from the shape directory.
    ///
    /// Missing directory means no extra shapes; a malformed file is
    /// FATAL (the registry cannot be trusted half-built).
    pub fn load_all(&mut self) -> SchemaResult<()> {
        let dir = match &self.shape_dir {
            Some(dir) => dir.clone(),
            None => return Ok(()),
        };

        if !dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&dir).map_err(|e| {
            SchemaError::malformed_shape(
                dir.display().to_string(),
                format!("Failed to read shape directory: {}", e),
            )
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_shape(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_shape_file(&path)?;
        }

        Ok(())
    }

    /// Loads a single shape file.
    fn load_shape_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_shape(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let file: ShapeFile = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_shape(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        self.register(&file.template, file.shape)
    }

    /// Saves a registered shape to the shape directory.
    pub fn save_shape(&self, template: &str, shape: &Shape) -> SchemaResult<PathBuf> {
        let dir = self.shape_dir.as_ref().ok_or_else(|| {
            SchemaError::malformed_shape(template, "registry has no shape directory")
        })?;

        let filename = format!("shape_{}.json", shape.name);
        let path = dir.join(&filename);

        if path.exists() {
            return Err(SchemaError::shape_immutable(template));
        }

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                SchemaError::malformed_shape(
                    dir.display().to_string(),
                    format!("Failed to create shape directory: {}", e),
                )
            })?;
        }

        let file = ShapeFile {
            template: template.to_string(),
            shape: shape.clone(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|e| {
            SchemaError::malformed_shape(
                path.display().to_string(),
                format!("Failed to serialize shape: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_shape(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}
