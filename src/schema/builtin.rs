//! Builtin shapes for the game store
//!
//! One entry per node of the store tree:
//!
//! | template | shape |
//! |---|---|
//! | `/` | Root |
//! | `/config` | Config |
//! | `/config/modes/{id}` | GameMode |
//! | `/config/modes/{id}/config` | GameConfig |
//! | `/users/{uid}` | User |
//! | `/stats/{uid}` | UserStats |
//! | `/stats/{uid}/history/{id}` | GameHistory |
//! | `/stats/{uid}/history/{id}/{datetime}` | GameStats |

use std::collections::BTreeMap;

use super::types::{FieldDef, FieldType, MapKey, Shape};

/// All builtin (template, shape) pairs, most specific last.
pub fn builtin_shapes() -> Vec<(&'static str, Shape)> {
    vec![
        ("/", root_shape()),
        ("/config", Shape::object("Config", config_fields())),
        ("/config/modes/{id}", Shape::object("GameMode", game_mode_fields())),
        (
            "/config/modes/{id}/config",
            Shape::object("GameConfig", game_config_fields()),
        ),
        ("/users/{uid}", Shape::object("User", user_fields())),
        ("/stats/{uid}", Shape::object("UserStats", user_stats_fields())),
        (
            "/stats/{uid}/history/{id}",
            Shape::map("GameHistory", MapKey::DateTime, game_stats_type()),
        ),
        (
            "/stats/{uid}/history/{id}/{datetime}",
            Shape::object("GameStats", game_stats_fields()),
        ),
    ]
}

/// `/` - top-level container; sections appear as the store fills up.
fn root_shape() -> Shape {
    let mut fields = BTreeMap::new();
    fields.insert(
        "config".into(),
        FieldDef::optional(FieldType::Object {
            fields: config_fields(),
        }),
    );
    fields.insert(
        "users".into(),
        FieldDef::optional_map(
            MapKey::Uid,
            FieldType::Object {
                fields: user_fields(),
            },
        ),
    );
    fields.insert(
        "stats".into(),
        FieldDef::optional_map(
            MapKey::Uid,
            FieldType::Object {
                fields: user_stats_fields(),
            },
        ),
    );
    Shape::object("Root", fields)
}

/// `/config` - global settings, admin-authored.
fn config_fields() -> BTreeMap<String, FieldDef> {
    let mut fields = BTreeMap::new();
    fields.insert(
        "modes".into(),
        FieldDef::required_map(
            MapKey::Id,
            FieldType::Object {
                fields: game_mode_fields(),
            },
        ),
    );
    fields
}

/// `/config/modes/{id}` - one ruleset variant.
fn game_mode_fields() -> BTreeMap<String, FieldDef> {
    let mut fields = BTreeMap::new();
    fields.insert("name".into(), FieldDef::required_string());
    fields.insert("config".into(), FieldDef::required_object(game_config_fields()));
    fields
}

/// `/config/modes/{id}/config` - numeric tuning of one mode.
pub fn game_config_fields() -> BTreeMap<String, FieldDef> {
    let ints = [
        "initial_money",
        "initial_n_probes",
        "building_occupation_min",
        "factory_price",
        "factory_expansion_size",
        "factory_max_probe",
        "max_occupation",
        "probe_hp",
        "probe_price",
        "probe_claim_intensity",
        "probe_explosion_intensity",
        "turret_price",
        "turret_damage",
    ];
    let floats = [
        "base_income",
        "factory_maintenance_costs",
        "factory_build_probe_delay",
        "probe_speed",
        "probe_claim_delay",
        "probe_maintenance_costs",
        "turret_fire_delay",
        "turret_scope",
        "turret_maintenance_costs",
        "income_rate",
        "deprecate_rate",
    ];

    let mut fields = BTreeMap::new();
    for name in ints {
        fields.insert(name.into(), FieldDef::required_int());
    }
    for name in floats {
        fields.insert(name.into(), FieldDef::required_float());
    }
    fields
}

/// `/users/{uid}` - profile record; uid lives in the path, not the node.
fn user_fields() -> BTreeMap<String, FieldDef> {
    let mut fields = BTreeMap::new();
    fields.insert("username".into(), FieldDef::required_string());
    fields.insert("email".into(), FieldDef::required_string());
    fields.insert("avatar".into(), FieldDef::required_string());
    fields.insert("joined_on".into(), FieldDef::required_datetime());
    fields.insert("last_online".into(), FieldDef::required_datetime());
    fields
}

/// `/stats/{uid}` - per-user, per-mode statistics.
fn user_stats_fields() -> BTreeMap<String, FieldDef> {
    let mut fields = BTreeMap::new();
    fields.insert("mmrs".into(), FieldDef::required_map(MapKey::Id, FieldType::Int));
    fields.insert(
        "history".into(),
        FieldDef::required_map(
            MapKey::Id,
            FieldType::Map {
                key: MapKey::DateTime,
                value: Box::new(game_stats_type()),
            },
        ),
    );
    fields
}

/// `/stats/{uid}/history/{id}/{datetime}` - one game's result.
pub fn game_stats_fields() -> BTreeMap<String, FieldDef> {
    let mut fields = BTreeMap::new();
    fields.insert("mmr".into(), FieldDef::required_int());
    fields.insert("ranking".into(), FieldDef::required_array(FieldType::String));
    fields
}

fn game_stats_type() -> FieldType {
    FieldType::Object {
        fields: game_stats_fields(),
    }
}
