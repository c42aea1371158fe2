//! Cross-field constraint checks
//!
//! Constraints relate several fields of one shape-valid object. They are
//! registered as named predicates per shape, so new rules can be added
//! without touching the validator. A check receives the object and
//! reports a reason string on violation; the validator turns that into
//! an ARBOR_CROSS_FIELD_CONSTRAINT error. The checker never coerces or
//! repairs a value.

use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};

/// Outcome of one predicate: `Err` carries the violation reason.
pub type ConstraintOutcome = Result<(), String>;

/// A list of named cross-field checks for one shape.
pub struct ConstraintSet {
    shape: String,
    checks: Vec<(String, Box<dyn Fn(&Map<String, Value>) -> ConstraintOutcome + Send + Sync>)>,
}

impl ConstraintSet {
    /// Creates an empty set for the given shape name.
    pub fn new(shape: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            checks: Vec::new(),
        }
    }

    /// Shape name this set applies to.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Registers a named check.
    pub fn register<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(&Map<String, Value>) -> ConstraintOutcome + Send + Sync + 'static,
    {
        self.checks.push((name.into(), Box::new(check)));
    }

    /// Names of the registered checks, in registration order.
    pub fn check_names(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(|(name, _)| name.as_str())
    }

    /// Runs all checks against a value, stopping at the first violation.
    ///
    /// The value must be an object; anything else is a violation of the
    /// first registered check's precondition.
    pub fn run(&self, value: &Value) -> SchemaResult<()> {
        let obj = value.as_object().ok_or_else(|| {
            SchemaError::constraint_failed(&self.shape, "object_input", "value is not an object")
        })?;

        for (name, check) in &self.checks {
            check(obj).map_err(|reason| {
                SchemaError::constraint_failed(&self.shape, name.as_str(), reason)
            })?;
        }
        Ok(())
    }

    /// Builtin checks for GameConfig.
    pub fn game_config_defaults() -> Self {
        let mut set = Self::new("GameConfig");
        set.register("probe_count_within_factory_capacity", |obj| {
            let probes = require_int(obj, "initial_n_probes")?;
            let capacity = require_int(obj, "factory_max_probe")?;
            if probes < capacity {
                Ok(())
            } else {
                Err(format!(
                    "initial_n_probes ({}) must be less than factory_max_probe ({})",
                    probes, capacity
                ))
            }
        });
        set
    }

    /// Builtin checks for GameMode: apply the GameConfig checks to the
    /// nested `config` object, so mode-level writes cannot smuggle in an
    /// inconsistent tuning.
    pub fn game_mode_defaults() -> Self {
        let inner = Self::game_config_defaults();
        let mut set = Self::new("GameMode");
        set.register("config_satisfies_game_config_constraints", move |obj| {
            let config = obj
                .get("config")
                .ok_or_else(|| "field 'config' is absent".to_string())?;
            inner.run(config).map_err(|e| e.message().to_string())
        });
        set
    }
}

impl std::fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("shape", &self.shape)
            .field("checks", &self.check_names().collect::<Vec<_>>())
            .finish()
    }
}

fn require_int(obj: &Map<String, Value>, field: &str) -> Result<i64, String> {
    obj.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| format!("field '{}' is absent or not an int", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probe_count_below_capacity_passes() {
        let set = ConstraintSet::game_config_defaults();
        let value = json!({ "initial_n_probes": 2, "factory_max_probe": 3 });
        assert!(set.run(&value).is_ok());
    }

    #[test]
    fn test_probe_count_at_capacity_fails() {
        let set = ConstraintSet::game_config_defaults();
        let value = json!({ "initial_n_probes": 3, "factory_max_probe": 3 });
        let err = set.run(&value).unwrap_err();
        assert_eq!(err.code().code(), "ARBOR_CROSS_FIELD_CONSTRAINT");
        assert!(err.message().contains("probe_count_within_factory_capacity"));
    }

    #[test]
    fn test_probe_count_above_capacity_fails() {
        let set = ConstraintSet::game_config_defaults();
        let value = json!({ "initial_n_probes": 5, "factory_max_probe": 3 });
        assert!(set.run(&value).is_err());
    }

    #[test]
    fn test_missing_field_is_a_violation() {
        let set = ConstraintSet::game_config_defaults();
        let value = json!({ "factory_max_probe": 3 });
        let err = set.run(&value).unwrap_err();
        assert!(err.message().contains("initial_n_probes"));
    }

    #[test]
    fn test_non_object_input_rejected() {
        let set = ConstraintSet::game_config_defaults();
        assert!(set.run(&json!(42)).is_err());
    }

    #[test]
    fn test_mode_level_check_reaches_nested_config() {
        let set = ConstraintSet::game_mode_defaults();
        let value = json!({
            "name": "base",
            "config": { "initial_n_probes": 9, "factory_max_probe": 3 }
        });
        let err = set.run(&value).unwrap_err();
        assert!(err.message().contains("factory_max_probe"));
    }

    #[test]
    fn test_extension_without_touching_builtins() {
        let mut set = ConstraintSet::game_config_defaults();
        set.register("positive_probe_hp", |obj| {
            match obj.get("probe_hp").and_then(Value::as_i64) {
                Some(hp) if hp > 0 => Ok(()),
                _ => Err("probe_hp must be positive".into()),
            }
        });

        let value = json!({
            "initial_n_probes": 2,
            "factory_max_probe": 3,
            "probe_hp": 0
        });
        let err = set.run(&value).unwrap_err();
        assert!(err.message().contains("positive_probe_hp"));
    }
}
