//! Configuration documents: game modes and their tuning

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric tuning of one game mode (`/config/modes/{id}/config`).
///
/// Unconstrained in range here except for the cross-field rule that
/// `initial_n_probes` stays below `factory_max_probe`; positivity is
/// the simulation's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub initial_money: i64,
    pub initial_n_probes: i64,
    pub base_income: f64,
    pub building_occupation_min: i64,
    pub factory_price: i64,
    pub factory_expansion_size: i64,
    pub factory_maintenance_costs: f64,
    pub factory_max_probe: i64,
    pub factory_build_probe_delay: f64,
    pub max_occupation: i64,
    pub probe_speed: f64,
    pub probe_hp: i64,
    pub probe_price: i64,
    pub probe_claim_delay: f64,
    pub probe_claim_intensity: i64,
    pub probe_explosion_intensity: i64,
    pub probe_maintenance_costs: f64,
    pub turret_price: i64,
    pub turret_damage: i64,
    pub turret_fire_delay: f64,
    pub turret_scope: f64,
    pub turret_maintenance_costs: f64,
    pub income_rate: f64,
    pub deprecate_rate: f64,
}

/// One ruleset variant (`/config/modes/{id}`).
///
/// The id is the map key in the store, not a node field; it is filled
/// in when a mode is read out of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMode {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub config: GameConfig,
}

/// The config node of the store (`/config`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbConfig {
    pub modes: BTreeMap<String, GameMode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_config() -> GameConfig {
        GameConfig {
            initial_money: 150,
            initial_n_probes: 2,
            base_income: 2.0,
            building_occupation_min: 1,
            factory_price: 60,
            factory_expansion_size: 4,
            factory_maintenance_costs: 1.5,
            factory_max_probe: 5,
            factory_build_probe_delay: 3.0,
            max_occupation: 10,
            probe_speed: 2.5,
            probe_hp: 6,
            probe_price: 10,
            probe_claim_delay: 0.6,
            probe_claim_intensity: 2,
            probe_explosion_intensity: 3,
            probe_maintenance_costs: 0.25,
            turret_price: 40,
            turret_damage: 3,
            turret_fire_delay: 1.0,
            turret_scope: 3.5,
            turret_maintenance_costs: 0.8,
            income_rate: 0.05,
            deprecate_rate: 0.1,
        }
    }

    #[test]
    fn test_mode_id_stays_out_of_the_node() {
        let mode = GameMode {
            id: "m1".into(),
            name: "base".into(),
            config: sample_config(),
        };
        let value = serde_json::to_value(&mode).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["name"], json!("base"));
    }

    #[test]
    fn test_mode_deserializes_without_id() {
        let value = json!({ "name": "base", "config": serde_json::to_value(sample_config()).unwrap() });
        let mode: GameMode = serde_json::from_value(value).unwrap();
        assert!(mode.id.is_empty());
        assert_eq!(mode.name, "base");
    }

    #[test]
    fn test_config_round_trip() {
        let config = sample_config();
        let value = serde_json::to_value(&config).unwrap();
        let decoded: GameConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config, decoded);
    }
}
