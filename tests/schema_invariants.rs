//! Shape validation invariant tests
//!
//! - Path templates resolve concrete paths to their shapes
//! - All required fields must be present
//! - Type matching is exact (int widens to float, never the reverse)
//! - Strict mode rejects undeclared fields
//! - Cross-field constraints hold for every conforming GameConfig
//! - Validation is deterministic and idempotent over serialization

use arbordb::schema::{SchemaErrorCode, ShapeRegistry, Validator};
use serde_json::{json, Value};

fn game_config(initial_n_probes: i64, factory_max_probe: i64) -> Value {
    json!({
        "initial_money": 150,
        "initial_n_probes": initial_n_probes,
        "base_income": 2.0,
        "building_occupation_min": 1,
        "factory_price": 60,
        "factory_expansion_size": 4,
        "factory_maintenance_costs": 1.5,
        "factory_max_probe": factory_max_probe,
        "factory_build_probe_delay": 3.0,
        "max_occupation": 10,
        "probe_speed": 2.5,
        "probe_hp": 6,
        "probe_price": 10,
        "probe_claim_delay": 0.6,
        "probe_claim_intensity": 2,
        "probe_explosion_intensity": 3,
        "probe_maintenance_costs": 0.25,
        "turret_price": 40,
        "turret_damage": 3,
        "turret_fire_delay": 1.0,
        "turret_scope": 3.5,
        "turret_maintenance_costs": 0.8,
        "income_rate": 0.05,
        "deprecate_rate": 0.1
    })
}

// =============================================================================
// Path resolution
// =============================================================================

#[test]
fn test_stats_path_resolves_to_user_stats() {
    let registry = ShapeRegistry::builtin();
    assert_eq!(registry.shape_for("/stats/u1").unwrap().name, "UserStats");
}

#[test]
fn test_unregistered_path_is_unknown() {
    let registry = ShapeRegistry::builtin();
    let err = registry.shape_for("/nonexistent").unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::UnknownPath);
}

#[test]
fn test_every_table_row_resolves() {
    let registry = ShapeRegistry::builtin();
    let expectations = [
        ("/", "Root"),
        ("/config", "Config"),
        ("/config/modes/m1", "GameMode"),
        ("/config/modes/m1/config", "GameConfig"),
        ("/users/u1", "User"),
        ("/stats/u1", "UserStats"),
        ("/stats/u1/history/m1", "GameHistory"),
        ("/stats/u1/history/m1/2026-01-05T18:30:00", "GameStats"),
    ];
    for (path, shape) in expectations {
        assert_eq!(registry.shape_for(path).unwrap().name, shape, "path {}", path);
    }
}

// =============================================================================
// Required fields and type exactness
// =============================================================================

#[test]
fn test_missing_required_field_is_named() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    let value = json!({ "mmr": 1500 });
    let err = validator
        .validate("/stats/u1/history/m1/2026-01-05T18:30:00", &value)
        .unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::MissingField);
    assert_eq!(err.details().unwrap().field, "ranking");
}

#[test]
fn test_game_stats_example_scenarios() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);
    let path = "/stats/u1/history/m1/2026-01-05T18:30:00";

    let good = json!({ "mmr": 1500, "ranking": ["u1", "u2", "u3"] });
    assert!(validator.validate(path, &good).is_ok());

    let bad = json!({ "mmr": "1500", "ranking": ["u1"] });
    let err = validator.validate(path, &bad).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::TypeMismatch);
    assert_eq!(err.details().unwrap().field, "mmr");
}

#[test]
fn test_int_field_rejects_float_value() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    let mut value = game_config(2, 5);
    value["probe_hp"] = json!(6.5);
    let err = validator
        .validate("/config/modes/m1/config", &value)
        .unwrap_err();
    assert_eq!(err.details().unwrap().field, "probe_hp");
    assert_eq!(err.details().unwrap().expected, "int");
}

#[test]
fn test_float_field_accepts_int_value() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    let mut value = game_config(2, 5);
    value["turret_scope"] = json!(4);
    assert!(validator.validate("/config/modes/m1/config", &value).is_ok());
}

#[test]
fn test_strict_mode_rejects_extra_field() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    let value = json!({
        "username": "alice",
        "email": "alice@example.com",
        "avatar": "fox",
        "joined_on": "2026-01-05T18:30:00",
        "last_online": "2026-01-05T18:30:00",
        "nickname": "al"
    });
    let err = validator.validate("/users/u1", &value).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::UnexpectedField);
    assert_eq!(err.details().unwrap().field, "nickname");
}

#[test]
fn test_lenient_mode_tolerates_extra_field() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry).with_unknown_fields_allowed();

    let value = json!({
        "username": "alice",
        "email": "alice@example.com",
        "avatar": "fox",
        "joined_on": "2026-01-05T18:30:00",
        "last_online": "2026-01-05T18:30:00",
        "nickname": "al"
    });
    assert!(validator.validate("/users/u1", &value).is_ok());
}

// =============================================================================
// Cross-field constraints
// =============================================================================

#[test]
fn test_probe_counts_below_capacity_pass() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    for (probes, capacity) in [(0, 1), (2, 3), (4, 100)] {
        let value = game_config(probes, capacity);
        assert!(
            validator.validate("/config/modes/m1/config", &value).is_ok(),
            "{} < {}",
            probes,
            capacity
        );
    }
}

#[test]
fn test_probe_counts_at_or_above_capacity_fail() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    for (probes, capacity) in [(3, 3), (5, 3), (1, 0)] {
        let err = validator
            .validate("/config/modes/m1/config", &game_config(probes, capacity))
            .unwrap_err();
        assert_eq!(
            err.code(),
            SchemaErrorCode::CrossFieldConstraint,
            "{} >= {}",
            probes,
            capacity
        );
    }
}

#[test]
fn test_cross_field_applies_through_mode_node() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    let value = json!({ "name": "base", "config": game_config(5, 3) });
    let err = validator.validate("/config/modes/m1", &value).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::CrossFieldConstraint);
}

// =============================================================================
// Determinism and idempotence
// =============================================================================

#[test]
fn test_validation_is_deterministic() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);
    let value = game_config(5, 3);

    for _ in 0..100 {
        assert!(validator.validate("/config/modes/m1/config", &value).is_err());
    }
}

#[test]
fn test_serialization_round_trip_revalidates() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);
    let path = "/stats/u1";

    let value = json!({
        "mmrs": { "m1": 110 },
        "history": {
            "m1": {
                "2026-01-05T18:30:00": { "mmr": 110, "ranking": ["u1", "u2"] }
            }
        }
    });
    validator.validate(path, &value).unwrap();

    let encoded = serde_json::to_string(&value).unwrap();
    let decoded: Value = serde_json::from_str(&encoded).unwrap();
    assert!(validator.validate(path, &decoded).is_ok());
}

#[test]
fn test_collect_all_reports_every_mismatch() {
    let registry = ShapeRegistry::builtin();
    let validator = Validator::new(&registry);

    let value = json!({
        "username": 7,
        "email": "alice@example.com",
        "avatar": "fox",
        "joined_on": "never"
    });
    let errors = validator.validate_all("/users/u1", &value);
    // username type, joined_on format, last_online missing
    assert_eq!(errors.len(), 3);
}
