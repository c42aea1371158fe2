//! Shape validator for store values
//!
//! Validation semantics:
//! - All required fields are present
//! - Field types match exactly (int where float is expected is the one
//!   tolerated widening; the reverse is a mismatch)
//! - Undeclared fields are rejected in strict mode (default), tolerated
//!   in lenient mode
//! - Map keys are checked against their identifier kind
//! - Cross-field constraints run after the structural pass
//!
//! The validator is a pure function of (path, value). It never mutates
//! or coerces a value, and validation is deterministic.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::path::segments;

use super::constraints::ConstraintSet;
use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::registry::ShapeRegistry;
use super::types::{parse_datetime, FieldDef, FieldType};

/// Validates candidate values against the shapes registered for their
/// paths.
pub struct Validator<'a> {
    registry: &'a ShapeRegistry,
    strict: bool,
    constraints: Vec<ConstraintSet>,
}

impl<'a> Validator<'a> {
    /// Creates a strict validator with the builtin cross-field checks.
    pub fn new(registry: &'a ShapeRegistry) -> Self {
        Self {
            registry,
            strict: true,
            constraints: vec![
                ConstraintSet::game_config_defaults(),
                ConstraintSet::game_mode_defaults(),
            ],
        }
    }

    /// Tolerates undeclared fields. The underlying persistence layer may
    /// not enforce a closed schema, so callers reading foreign data can
    /// opt out of strictness.
    pub fn with_unknown_fields_allowed(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Adds a cross-field constraint set for a shape.
    pub fn register_constraints(&mut self, set: ConstraintSet) {
        self.constraints.push(set);
    }

    /// Validates a value against the shape registered for `path`,
    /// reporting the first mismatch.
    pub fn validate(&self, path: &str, value: &Value) -> SchemaResult<()> {
        let resolution = self.registry.resolve(path)?;
        let shape = resolution.shape;

        self.check_path_keys(path, &shape.name)?;

        let mut sink = Sink::fail_fast();
        let _ = self.check_value(&shape.name, value, &shape.root, "", &mut sink);
        if let Some(err) = sink.errors.into_iter().next() {
            return Err(err);
        }

        self.run_constraints(&shape.name, value)
    }

    /// Validates a value, collecting every field-level mismatch instead
    /// of stopping at the first. An empty vector means the value
    /// conforms.
    pub fn validate_all(&self, path: &str, value: &Value) -> Vec<SchemaError> {
        let resolution = match self.registry.resolve(path) {
            Ok(r) => r,
            Err(e) => return vec![e],
        };
        let shape = resolution.shape;

        let mut sink = Sink::collect();
        if let Err(e) = self.check_path_keys(path, &shape.name) {
            sink.errors.push(e);
        }
        let _ = self.check_value(&shape.name, value, &shape.root, "", &mut sink);

        if let Err(e) = self.run_constraints(&shape.name, value) {
            sink.errors.push(e);
        }
        sink.errors
    }

    /// Runs the cross-field constraint sets registered for a shape name
    /// against a shape-valid value. Shapes without constraints pass.
    pub fn validate_cross_field(&self, shape_name: &str, value: &Value) -> SchemaResult<()> {
        self.run_constraints(shape_name, value)
    }

    /// Checks the path's own segments against the key kinds declared by
    /// the maps they index into, walking the tree shape from the root.
    ///
    /// A node written at `/stats/{uid}/history/{id}/{datetime}` lands as
    /// an entry of the history map, so the `{datetime}` segment must be a
    /// key that map accepts; otherwise the stored parent node could never
    /// re-validate against its own shape.
    fn check_path_keys(&self, path: &str, shape_name: &str) -> SchemaResult<()> {
        let Ok(root) = self.registry.shape_for("/") else {
            // Without a root shape there is no containing map to consult.
            return Ok(());
        };

        let mut current = &root.root;
        for segment in segments(path) {
            match current {
                FieldType::Object { fields } => match fields.get(segment) {
                    Some(def) => current = &def.field_type,
                    None => return Ok(()),
                },
                FieldType::Map { key, value } => {
                    if !key.accepts(segment) {
                        return Err(SchemaError::type_mismatch(
                            shape_name,
                            ValidationDetails::type_mismatch(
                                segment,
                                key.kind_name(),
                                format!("key '{}'", segment),
                            ),
                        ));
                    }
                    current = value;
                }
                _ => return Ok(()),
            }
        }
        Ok(())
    }

    fn run_constraints(&self, shape_name: &str, value: &Value) -> SchemaResult<()> {
        for set in &self.constraints {
            if set.shape() == shape_name {
                set.run(value)?;
            }
        }
        Ok(())
    }

    /// Validates a value against a field type.
    fn check_value(
        &self,
        shape: &str,
        value: &Value,
        expected: &FieldType,
        location: &str,
        sink: &mut Sink,
    ) -> Result<(), Stop> {
        match expected {
            FieldType::String => {
                if !value.is_string() {
                    sink.record(type_error(shape, location, "string", value))?;
                }
            }
            FieldType::Int => {
                if !value.is_i64() && !value.is_u64() {
                    sink.record(type_error(shape, location, "int", value))?;
                }
            }
            FieldType::Float => {
                // Integral values widen to float; the reverse never holds.
                if !value.is_number() {
                    sink.record(type_error(shape, location, "float", value))?;
                }
            }
            FieldType::Bool => {
                if !value.is_boolean() {
                    sink.record(type_error(shape, location, "bool", value))?;
                }
            }
            FieldType::DateTime => match value.as_str() {
                Some(raw) if parse_datetime(raw).is_some() => {}
                _ => sink.record(type_error(shape, location, "datetime", value))?,
            },
            FieldType::Object { fields } => match value.as_object() {
                Some(obj) => self.check_object(shape, obj, fields, location, sink)?,
                None => sink.record(type_error(shape, location, "object", value))?,
            },
            FieldType::Array { element } => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let item_location = format!("{}[{}]", location, i);
                        self.check_value(shape, item, element, &item_location, sink)?;
                    }
                }
                None => sink.record(type_error(shape, location, "array", value))?,
            },
            FieldType::Map { key, value: value_type } => match value.as_object() {
                Some(entries) => {
                    for (entry_key, entry_value) in entries {
                        let entry_location = make_location(location, entry_key);
                        if !key.accepts(entry_key) {
                            sink.record(SchemaError::type_mismatch(
                                shape,
                                ValidationDetails::type_mismatch(
                                    &entry_location,
                                    key.kind_name(),
                                    format!("key '{}'", entry_key),
                                ),
                            ))?;
                        }
                        self.check_value(shape, entry_value, value_type, &entry_location, sink)?;
                    }
                }
                None => sink.record(type_error(shape, location, "map", value))?,
            },
        }

        Ok(())
    }

    /// Validates an object against field definitions.
    fn check_object(
        &self,
        shape: &str,
        obj: &serde_json::Map<String, Value>,
        fields: &BTreeMap<String, FieldDef>,
        location: &str,
        sink: &mut Sink,
    ) -> Result<(), Stop> {
        if self.strict {
            for key in obj.keys() {
                if !fields.contains_key(key) {
                    sink.record(SchemaError::unexpected_field(
                        shape,
                        make_location(location, key),
                    ))?;
                }
            }
        }

        for (field_name, field_def) in fields {
            let field_location = make_location(location, field_name);
            match obj.get(field_name) {
                Some(value) => {
                    self.check_value(shape, value, &field_def.field_type, &field_location, sink)?;
                }
                None => {
                    if field_def.required {
                        sink.record(SchemaError::missing_field(shape, field_location))?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Marker for aborting the walk in fail-fast mode.
struct Stop;

/// Collects mismatches during the structural walk.
struct Sink {
    errors: Vec<SchemaError>,
    fail_fast: bool,
}

impl Sink {
    fn fail_fast() -> Self {
        Self {
            errors: Vec::new(),
            fail_fast: true,
        }
    }

    fn collect() -> Self {
        Self {
            errors: Vec::new(),
            fail_fast: false,
        }
    }

    fn record(&mut self, err: SchemaError) -> Result<(), Stop> {
        self.errors.push(err);
        if self.fail_fast {
            Err(Stop)
        } else {
            Ok(())
        }
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a dotted location from prefix and field name.
fn make_location(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Creates a type mismatch error.
fn type_error(shape: &str, location: &str, expected: &str, actual: &Value) -> SchemaError {
    let location = if location.is_empty() { "$root" } else { location };
    SchemaError::type_mismatch(
        shape,
        ValidationDetails::type_mismatch(location, expected, json_type_name(actual)),
    )
}
