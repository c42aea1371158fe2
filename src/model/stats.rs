//! Statistics documents
//!
//! Node structs mirror the persisted layout: a game's date is the map
//! key of its `GameHistory` entry, not a field of the entry. The
//! assembled types put the date back on the record and resolve mode
//! ids to full modes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::GameMode;
use super::time::{format_datetime, iso_seconds};

/// One game's result as stored (`/stats/{uid}/history/{id}/{datetime}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatsNode {
    /// MMR of the user AFTER the game
    pub mmr: i64,
    /// UIDs of all players in the game (including self), best to worst
    pub ranking: Vec<String>,
}

/// One mode's game log as stored (`/stats/{uid}/history/{id}`).
///
/// Keys are store-encoded datetimes; BTreeMap iteration is therefore
/// chronological.
pub type GameHistoryNode = BTreeMap<String, GameStatsNode>;

/// The stats node of one user as stored (`/stats/{uid}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatsNode {
    /// Current MMR per game mode id
    pub mmrs: BTreeMap<String, i64>,
    /// Game log per game mode id
    pub history: BTreeMap<String, GameHistoryNode>,
}

impl UserStatsNode {
    /// A fresh node, written when the account is provisioned.
    pub fn empty() -> Self {
        Self {
            mmrs: BTreeMap::new(),
            history: BTreeMap::new(),
        }
    }
}

/// One game's result with its date attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(with = "iso_seconds")]
    pub date: NaiveDateTime,
    pub mmr: i64,
    pub ranking: Vec<String>,
}

impl GameStats {
    /// Rebuilds a record from its history map entry. `None` when the
    /// key is not a store datetime.
    pub fn from_entry(date_key: &str, node: &GameStatsNode) -> Option<Self> {
        let date = crate::schema::parse_datetime(date_key)?;
        Some(Self {
            date,
            mmr: node.mmr,
            ranking: node.ranking.clone(),
        })
    }

    /// Splits this record back into its history map entry.
    pub fn entry(&self) -> (String, GameStatsNode) {
        (
            format_datetime(&self.date),
            GameStatsNode {
                mmr: self.mmr,
                ranking: self.ranking.clone(),
            },
        )
    }
}

/// Current MMRs of one user across all game modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMmrs {
    /// Key: game mode id
    pub mmrs: BTreeMap<String, i64>,
}

/// History of all games played in one mode, chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameModeHistory {
    pub mode: GameMode,
    pub history: Vec<GameStats>,
}

/// Assembled statistics of one user across all modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub mmrs: UserMmrs,
    /// Key: game mode id
    pub history: BTreeMap<String, GameModeHistory>,
}

/// Per-mode statistics processed for consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedGameModeStats {
    pub mode: GameMode,
    /// Occurrences of each resulting position; index 0 counts wins
    pub scores: Vec<i64>,
    /// Dates of all played games, store encoding, chronological
    pub dates: Vec<String>,
    /// MMR after each game, same order as `dates`
    pub mmr_hist: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_game_stats_entry_round_trip() {
        let node = GameStatsNode {
            mmr: 112,
            ranking: vec!["u1".into(), "u2".into()],
        };
        let stats = GameStats::from_entry("2026-01-05T18:30:00", &node).unwrap();
        assert_eq!(stats.mmr, 112);

        let (key, back) = stats.entry();
        assert_eq!(key, "2026-01-05T18:30:00");
        assert_eq!(back, node);
    }

    #[test]
    fn test_from_entry_rejects_bad_key() {
        let node = GameStatsNode {
            mmr: 112,
            ranking: vec!["u1".into()],
        };
        assert!(GameStats::from_entry("yesterday", &node).is_none());
    }

    #[test]
    fn test_history_node_iterates_chronologically() {
        let mut history = GameHistoryNode::new();
        let node = GameStatsNode {
            mmr: 100,
            ranking: vec!["u1".into()],
        };
        history.insert("2026-01-06T09:00:00".into(), node.clone());
        history.insert("2026-01-05T18:30:00".into(), node.clone());
        history.insert("2026-01-05T09:00:00".into(), node);

        let keys: Vec<_> = history.keys().collect();
        assert_eq!(
            keys,
            vec![
                "2026-01-05T09:00:00",
                "2026-01-05T18:30:00",
                "2026-01-06T09:00:00"
            ]
        );
    }

    #[test]
    fn test_empty_stats_node_serializes_to_empty_maps() {
        let value = serde_json::to_value(UserStatsNode::empty()).unwrap();
        assert_eq!(value, json!({ "mmrs": {}, "history": {} }));
    }
}
