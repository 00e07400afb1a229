//! Defensive move selection
//!
//! Every empty cell is priced three ways: how strong the opponent would be
//! there, how much of an opponent run it sits next to, and how strong the
//! advisor would be there. The best-priced cell is the block, provided it
//! reaches the open-two weight; below that nothing needs defending.

use crate::board::{Axis, Bitboard, Board, Pos, Stone};
use crate::config::Tuning;
use crate::eval::{PatternScorer, WeightTable, REACH};

use super::Candidate;

/// Cell to defend against `opponent`, scored for `side`.
///
/// Ties go to the first cell in row-major order. `None` when the best score
/// stays below the open-two weight.
pub fn find_blocking_move(
    board: &mut Board,
    opponent: Stone,
    side: Stone,
    scorer: &PatternScorer,
    tuning: &Tuning,
) -> Option<Candidate> {
    let empty: Vec<Pos> = board.empty_cells().collect();

    let mut diagonal_threats = Bitboard::new();
    for &pos in &empty {
        if is_diagonal_threat(board, pos, opponent, tuning.diagonal_threat_reach) {
            diagonal_threats.set(pos);
        }
    }

    let mut best: Option<Candidate> = None;
    for pos in empty {
        let threat = scorer.evaluate_position(board, pos, opponent);
        let continuity = continuity_score(board, pos, opponent, scorer.weights(), tuning);
        let attack = scorer.evaluate_position(board, pos, side);

        let mut total = f64::from(threat) * tuning.defense_weight
            + continuity * tuning.continuity_weight
            + f64::from(attack) * tuning.attack_weight;
        if diagonal_threats.get(pos) {
            total *= tuning.diagonal_threat_multiplier;
        }

        if best.map_or(true, |b| total > b.score) {
            best = Some(Candidate::new(pos, total));
        }
    }

    let threshold = f64::from(scorer.weights().open_two);
    best.filter(|b| b.score >= threshold)
}

/// Whether `opponent` has at least two stones and some free space within
/// `reach` cells of `pos` along either diagonal. Scanning a sense stops at
/// the board edge or a non-opponent stone.
pub fn is_diagonal_threat(board: &Board, pos: Pos, opponent: Stone, reach: usize) -> bool {
    Axis::DIAGONALS.iter().any(|&axis| {
        let (dr, dc) = axis.delta();
        let mut stones = 0;
        let mut spaces = 0;
        for sense in [-1, 1] {
            for step in 1..=reach as i32 {
                let Some(p) = pos.offset(dr * sense, dc * sense, step) else {
                    break;
                };
                match board.get(p) {
                    s if s == opponent => stones += 1,
                    Stone::Empty => spaces += 1,
                    _ => break,
                }
            }
        }
        stones >= 2 && spaces >= 1
    })
}

/// How much of a multi-move `player` threat `pos` sits against.
///
/// Per axis, both senses are walked up to [`REACH`] cells: stones touching
/// `pos` extend the run until the first empty cell, empty cells add space (a
/// cell right after a run of two or more counts double). A stone of the
/// other colour ends the walk as blocked; the board edge just ends it. The
/// axis scores like the shape it resembles; the estimate is the best axis.
pub fn continuity_score(
    board: &Board,
    pos: Pos,
    player: Stone,
    weights: &WeightTable,
    tuning: &Tuning,
) -> f64 {
    let mut best = 0.0f64;

    for axis in Axis::ALL {
        let (dr, dc) = axis.delta();
        let diagonal = axis.is_diagonal();
        let mut consecutive = 1;
        let mut spaces = 0;
        let mut blocked = 0;

        for sense in [-1, 1] {
            let mut space_found = false;
            let mut current_run = 0;

            for step in 1..=REACH as i32 {
                let Some(p) = pos.offset(dr * sense, dc * sense, step) else {
                    break;
                };
                match board.get(p) {
                    s if s == player => {
                        if !space_found {
                            consecutive += 1;
                            current_run += 1;
                        }
                    }
                    Stone::Empty => {
                        spaces += if current_run >= 2 { 2 } else { 1 };
                        space_found = true;
                        current_run = 0;
                    }
                    _ => {
                        blocked += 1;
                        break;
                    }
                }
            }
        }

        let pick = |plain: i32, diag: i32| f64::from(if diagonal { diag } else { plain });
        let mut score = if consecutive >= 4 && spaces >= 1 {
            f64::from(weights.open_four)
        } else if consecutive >= 3 {
            if spaces >= 2 {
                pick(weights.open_three, weights.diagonal_open_three)
            } else if blocked == 1 {
                pick(weights.closed_three, weights.diagonal_closed_three)
            } else {
                0.0
            }
        } else if consecutive >= 2 && spaces >= 2 {
            pick(weights.open_two, weights.diagonal_open_two)
        } else {
            0.0
        };

        if diagonal && consecutive >= 3 && spaces >= 1 {
            score *= tuning.diagonal_run_multiplier;
        }

        best = best.max(score);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, stones: &[(u8, u8)], color: Stone) {
        for &(r, c) in stones {
            board.place_stone(Pos::new(r, c), color);
        }
    }

    fn block(board: &mut Board, opponent: Stone, side: Stone) -> Option<Pos> {
        find_blocking_move(board, opponent, side, &PatternScorer::default(), &Tuning::default())
            .map(|c| c.pos)
    }

    #[test]
    fn test_blocks_open_three_at_extension() {
        let mut board = Board::new();
        place(&mut board, &[(7, 5), (7, 6), (7, 7)], Stone::Black);
        let before = board.clone();

        let pos = block(&mut board, Stone::Black, Stone::White);
        assert!(
            pos == Some(Pos::new(7, 4)) || pos == Some(Pos::new(7, 8)),
            "blocked at {pos:?}"
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_blocks_vertical_open_three() {
        let mut board = Board::new();
        place(&mut board, &[(4, 10), (5, 10), (6, 10)], Stone::White);
        place(&mut board, &[(9, 2)], Stone::Black);

        let pos = block(&mut board, Stone::White, Stone::Black);
        assert!(
            pos == Some(Pos::new(3, 10)) || pos == Some(Pos::new(7, 10)),
            "blocked at {pos:?}"
        );
    }

    #[test]
    fn test_blocks_edge_four() {
        let mut board = Board::new();
        place(&mut board, &[(0, 0), (0, 1), (0, 2), (0, 3)], Stone::Black);
        place(&mut board, &[(5, 5)], Stone::White);
        assert_eq!(block(&mut board, Stone::Black, Stone::White), Some(Pos::new(0, 4)));
    }

    #[test]
    fn test_quiet_board_needs_no_block() {
        let mut board = Board::new();
        assert_eq!(block(&mut board, Stone::Black, Stone::White), None);

        // A lone own stone in the corner offers nothing above a closed two
        place(&mut board, &[(0, 0)], Stone::White);
        assert_eq!(block(&mut board, Stone::Black, Stone::White), None);
    }

    #[test]
    fn test_diagonal_threat_flag() {
        let mut board = Board::new();
        place(&mut board, &[(5, 5), (6, 6)], Stone::Black);
        assert!(is_diagonal_threat(&board, Pos::new(7, 7), Stone::Black, 4));
        assert!(is_diagonal_threat(&board, Pos::new(4, 4), Stone::Black, 4));
        assert!(!is_diagonal_threat(&board, Pos::new(7, 8), Stone::Black, 4));

        // An own stone in between hides the run
        place(&mut board, &[(4, 4)], Stone::White);
        assert!(!is_diagonal_threat(&board, Pos::new(3, 3), Stone::Black, 4));
    }

    #[test]
    fn test_continuity_rewards_open_runs() {
        let mut board = Board::new();
        place(&mut board, &[(7, 5), (7, 6), (7, 7)], Stone::Black);
        let weights = WeightTable::default();
        let tuning = Tuning::default();

        let next_to_run = continuity_score(&board, Pos::new(7, 8), Stone::Black, &weights, &tuning);
        assert_eq!(next_to_run, f64::from(weights.open_four));

        let far = continuity_score(&board, Pos::new(2, 2), Stone::Black, &weights, &tuning);
        assert_eq!(far, 0.0);
    }

    #[test]
    fn test_continuity_edge_is_not_a_block() {
        let weights = WeightTable::default();
        let tuning = Tuning::default();
        let closed_three = f64::from(weights.closed_three);

        // Edge behind the run, white stone two cells ahead
        let mut board = Board::new();
        place(&mut board, &[(0, 0), (0, 1)], Stone::Black);
        place(&mut board, &[(0, 4)], Stone::White);
        let score = continuity_score(&board, Pos::new(0, 2), Stone::Black, &weights, &tuning);
        assert_eq!(score, closed_three);

        // Edge behind the run, white stone right ahead
        let mut board = Board::new();
        place(&mut board, &[(0, 0), (0, 1)], Stone::Black);
        place(&mut board, &[(0, 3)], Stone::White);
        let score = continuity_score(&board, Pos::new(0, 2), Stone::Black, &weights, &tuning);
        assert_eq!(score, closed_three);
    }

    #[test]
    fn test_diagonal_threat_multiplier_changes_block() {
        let mut board = Board::new();
        place(&mut board, &[(2, 5), (2, 6), (2, 7)], Stone::Black);
        place(&mut board, &[(10, 10), (11, 11)], Stone::Black);
        let scorer = PatternScorer::default();

        // Without the multiplier the open three is the block
        let flat = Tuning {
            diagonal_threat_multiplier: 1.0,
            ..Tuning::default()
        };
        let plain = find_blocking_move(&mut board, Stone::Black, Stone::White, &scorer, &flat)
            .expect("open three needs a block");
        assert!(
            plain.pos == Pos::new(2, 4) || plain.pos == Pos::new(2, 8),
            "blocked at {}",
            plain.pos
        );
        assert!(!is_diagonal_threat(&board, plain.pos, Stone::Black, flat.diagonal_threat_reach));

        // A heavy multiplier pulls the block onto the diagonal pair
        let heavy = Tuning {
            diagonal_threat_multiplier: 1000.0,
            ..Tuning::default()
        };
        let boosted = find_blocking_move(&mut board, Stone::Black, Stone::White, &scorer, &heavy)
            .expect("a block");
        assert_ne!(boosted.pos, plain.pos);
        assert!(is_diagonal_threat(&board, boosted.pos, Stone::Black, heavy.diagonal_threat_reach));
        assert!(boosted.score > plain.score);
    }

    #[test]
    fn test_continuity_diagonal_bonus() {
        let mut board = Board::new();
        place(&mut board, &[(5, 5), (6, 6)], Stone::Black);
        let weights = WeightTable::default();
        let tuning = Tuning::default();

        // Diagonal run of three with space beyond both ends
        let score = continuity_score(&board, Pos::new(7, 7), Stone::Black, &weights, &tuning);
        assert_eq!(score, f64::from(weights.diagonal_open_three) * tuning.diagonal_run_multiplier);
    }
}
