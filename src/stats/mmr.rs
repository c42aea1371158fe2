//! MMR delta computation

/// Computes the MMR difference for one finished game.
///
/// The resulting position is normalized to [0, 1] across the game's
/// players and mapped to a performance in [1, -1]; the delta is ten
/// times the performance, rounded. Winning a two-player game is +10,
/// losing it -10, finishing mid-field of an odd lobby is 0.
pub fn mmr_diff(n_players: u32, position: usize) -> i64 {
    if n_players < 2 {
        return 0;
    }
    let normalized = position as f64 / (n_players as f64 - 1.0);
    let performance = 1.0 - 2.0 * normalized;
    (10.0 * performance).round() as i64
}
