//! Assembling user statistics from raw stats nodes

use std::collections::BTreeMap;

use crate::model::{ExtendedGameModeStats, GameModeHistory, GameStats, UserMmrs, UserStats};
use crate::model::format_datetime;
use crate::store::{StoreError, StoreResult, TreeStore};

/// MMR granted in modes the user has not played yet.
pub const DEFAULT_MMR: i64 = 100;

/// Assembles one user's statistics across all registered game modes.
///
/// Modes the user never played get the default MMR and an empty
/// history. Every mode id appearing in the stored node must reference
/// a registered mode; a dangling id is an error, not a guess.
pub fn build_user_stats(store: &mut TreeStore, uid: &str) -> StoreResult<UserStats> {
    let node = store.user_stats_node(uid)?;
    let modes = store.game_modes()?;

    for id in node.mmrs.keys().chain(node.history.keys()) {
        if !modes.iter().any(|mode| &mode.id == id) {
            return Err(StoreError::UnknownGameMode(id.clone()));
        }
    }

    let mut mmrs = node.mmrs.clone();
    for mode in &modes {
        mmrs.entry(mode.id.clone()).or_insert(DEFAULT_MMR);
    }

    let mut history = BTreeMap::new();
    for mode in modes {
        let mut games = Vec::new();
        if let Some(raw) = node.history.get(&mode.id) {
            // BTreeMap order over store-encoded dates is chronological.
            for (date_key, game) in raw {
                let game = GameStats::from_entry(date_key, game).ok_or_else(|| {
                    StoreError::MalformedNode {
                        path: format!("/stats/{}/history/{}", uid, mode.id),
                        reason: format!("invalid date key '{}'", date_key),
                    }
                })?;
                games.push(game);
            }
        }
        history.insert(
            mode.id.clone(),
            GameModeHistory {
                mode,
                history: games,
            },
        );
    }

    Ok(UserStats {
        mmrs: UserMmrs { mmrs },
        history,
    })
}

/// Derives the processed per-mode insights from one mode's history.
///
/// `scores[i]` counts the games the user finished in position `i`;
/// `dates` and `mmr_hist` run in the history's (chronological) order.
pub fn extended_mode_stats(uid: &str, mode_history: &GameModeHistory) -> ExtendedGameModeStats {
    let lobby_size = mode_history
        .history
        .iter()
        .map(|game| game.ranking.len())
        .max()
        .unwrap_or(0);

    let mut scores = vec![0i64; lobby_size];
    let mut dates = Vec::with_capacity(mode_history.history.len());
    let mut mmr_hist = Vec::with_capacity(mode_history.history.len());

    for game in &mode_history.history {
        if let Some(position) = game.ranking.iter().position(|player| player == uid) {
            scores[position] += 1;
        }
        dates.push(format_datetime(&game.date));
        mmr_hist.push(game.mmr);
    }

    ExtendedGameModeStats {
        mode: mode_history.mode.clone(),
        scores,
        dates,
        mmr_hist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameConfig, GameMode, User};
    use chrono::NaiveDate;

    fn sample_user() -> User {
        User {
            username: "alice".into(),
            email: "alice@example.com".into(),
            avatar: "fox".into(),
            joined_on: date(1, 9),
            last_online: date(1, 9),
        }
    }

    fn date(day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_game_config() -> GameConfig {
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

    fn game(uid_first: bool, day: u32, mmr: i64) -> GameStats {
        let ranking = if uid_first {
            vec!["u1".to_string(), "u2".to_string()]
        } else {
            vec!["u2".to_string(), "u1".to_string()]
        };
        GameStats {
            date: date(day, 12),
            mmr,
            ranking,
        }
    }

    #[test]
    fn test_unplayed_mode_gets_default_mmr_and_empty_history() {
        let mut store = TreeStore::builtin();
        let mode = store.add_game_mode("base", sample_game_config()).unwrap();
        store.create_user("u1", &sample_user()).unwrap();

        let stats = build_user_stats(&mut store, "u1").unwrap();
        assert_eq!(stats.mmrs.mmrs.get(&mode), Some(&DEFAULT_MMR));
        assert!(stats.history.get(&mode).unwrap().history.is_empty());
    }

    #[test]
    fn test_played_games_come_back_chronologically() {
        let mut store = TreeStore::builtin();
        let mode = store.add_game_mode("base", sample_game_config()).unwrap();
        store.create_user("u1", &sample_user()).unwrap();

        // Push out of order; assembly must come back sorted by date.
        store.push_game_stats("u1", &mode, &game(true, 8, 120)).unwrap();
        store.push_game_stats("u1", &mode, &game(false, 6, 110)).unwrap();

        let stats = build_user_stats(&mut store, "u1").unwrap();
        let history = &stats.history.get(&mode).unwrap().history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date(6, 12));
        assert_eq!(history[1].date, date(8, 12));
        // Current MMR is the last write, not the latest game date.
        assert_eq!(stats.mmrs.mmrs.get(&mode), Some(&110));
    }

    #[test]
    fn test_dangling_mode_id_is_an_error() {
        let mut store = TreeStore::builtin();
        store.create_user("u1", &sample_user()).unwrap();
        store
            .set(
                "/stats/u1",
                serde_json::json!({ "mmrs": { "ghost": 140 }, "history": {} }),
            )
            .unwrap();

        assert!(matches!(
            build_user_stats(&mut store, "u1"),
            Err(StoreError::UnknownGameMode(_))
        ));
    }

    #[test]
    fn test_extended_stats_counts_positions() {
        let mut store = TreeStore::builtin();
        let mode = store.add_game_mode("base", sample_game_config()).unwrap();
        store.create_user("u1", &sample_user()).unwrap();

        store.push_game_stats("u1", &mode, &game(true, 6, 110)).unwrap();
        store.push_game_stats("u1", &mode, &game(true, 7, 120)).unwrap();
        store.push_game_stats("u1", &mode, &game(false, 8, 110)).unwrap();

        let stats = build_user_stats(&mut store, "u1").unwrap();
        let extended = extended_mode_stats("u1", stats.history.get(&mode).unwrap());

        assert_eq!(extended.scores, vec![2, 1]);
        assert_eq!(extended.mmr_hist, vec![110, 120, 110]);
        assert_eq!(
            extended.dates,
            vec![
                "2026-01-06T12:00:00",
                "2026-01-07T12:00:00",
                "2026-01-08T12:00:00"
            ]
        );
    }

    #[test]
    fn test_extended_stats_empty_history() {
        let mode = GameMode {
            id: "m1".into(),
            name: "base".into(),
            config: sample_game_config(),
        };
        let extended = extended_mode_stats(
            "u1",
            &GameModeHistory {
                mode,
                history: Vec::new(),
            },
        );
        assert!(extended.scores.is_empty());
        assert!(extended.dates.is_empty());
        assert!(extended.mmr_hist.is_empty());
    }
}
