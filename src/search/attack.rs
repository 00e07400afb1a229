//! Attacking move selection when nothing is urgent

use rand::Rng;

use crate::board::{Board, Pos, Stone, CENTER};
use crate::config::Tuning;
use crate::eval::PatternScorer;

use super::Candidate;

/// Empty cells touching at least one stone, in row-major order
pub fn attack_candidates(board: &Board) -> Vec<Pos> {
    board
        .empty_cells()
        .filter(|&pos| board.has_neighbor(pos))
        .collect()
}

/// Pick a building move for `side`.
///
/// Candidates score `own + opponent * attack_defense_weight`; the move is
/// drawn uniformly from the `top_candidates` best. With no candidate the
/// centre is returned if it is free, otherwise `None`.
pub fn find_best_attack_move<R: Rng + ?Sized>(
    board: &mut Board,
    side: Stone,
    opponent: Stone,
    scorer: &PatternScorer,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Candidate> {
    let mut scored: Vec<Candidate> = attack_candidates(board)
        .into_iter()
        .map(|pos| {
            let own = scorer.evaluate_position(board, pos, side);
            let theirs = scorer.evaluate_position(board, pos, opponent);
            Candidate::new(
                pos,
                f64::from(own) + f64::from(theirs) * tuning.attack_defense_weight,
            )
        })
        .collect();

    if scored.is_empty() {
        return board.is_empty(CENTER).then(|| Candidate::new(CENTER, 0.0));
    }

    // Stable sort: equal scores keep row-major order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    // A zero pool from a hand-built Tuning still takes the best move
    let pool = tuning.top_candidates.max(1).min(scored.len());
    Some(scored[rng.random_range(0..pool)])
}
