//! Typed documents for the game store
//!
//! One struct per node shape, serde-round-trippable against the
//! validated JSON form. Node structs mirror the persisted layout
//! exactly (identifiers live in the path, not the node); the assembled
//! types add back the identifiers and resolve mode references for
//! consumers.

mod config;
mod stats;
mod time;
mod user;

pub use config::{DbConfig, GameConfig, GameMode};
pub use stats::{
    ExtendedGameModeStats, GameHistoryNode, GameModeHistory, GameStats, GameStatsNode, UserMmrs,
    UserStats, UserStatsNode,
};
pub use time::{format_datetime, iso_seconds};
pub use user::User;
