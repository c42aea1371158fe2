//! Statistics subsystem for arbordb
//!
//! Pure read-side processing of stats nodes: assembling a user's
//! per-mode statistics with defaults filled in, deriving extended
//! per-mode insights, and the MMR delta formula applied after a game.

mod assemble;
mod mmr;

pub use assemble::{build_user_stats, extended_mode_stats, DEFAULT_MMR};
pub use mmr::mmr_diff;
