//! Pattern scorer shared by the threat evaluator and the attack selector

use std::sync::Arc;

use crate::board::{Axis, Board, Pos, Stone};

use super::line::Pattern;
use super::patterns::WeightTable;

/// Prices a cell for one side by the shapes it completes on each axis
#[derive(Debug, Clone)]
pub struct PatternScorer {
    weights: Arc<WeightTable>,
}

impl PatternScorer {
    pub fn new(weights: Arc<WeightTable>) -> Self {
        Self { weights }
    }

    #[inline]
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Score of `side` playing the empty cell `pos`: the sum over the four
    /// axes of the weight of the shape the stone would be part of.
    ///
    /// The stone is placed for the duration of the scan and lifted again
    /// before returning.
    pub fn evaluate_position(&self, board: &mut Board, pos: Pos, side: Stone) -> i32 {
        let trial = board.place_scoped(pos, side);
        Axis::ALL
            .iter()
            .map(|&axis| self.evaluate_pattern(&Self::get_pattern(&trial, pos, axis, side), axis))
            .sum()
    }

    /// The line through `pos` on `axis` as `side` sees it
    #[inline]
    pub fn get_pattern(board: &Board, pos: Pos, axis: Axis, side: Stone) -> Pattern {
        Pattern::scan(board, pos, axis, side)
    }

    /// Weight of the strongest shape in `pattern`, 0 if none
    pub fn evaluate_pattern(&self, pattern: &Pattern, axis: Axis) -> i32 {
        pattern
            .classify()
            .map_or(0, |shape| self.weights.weight(shape, axis))
    }
}

impl Default for PatternScorer {
    fn default() -> Self {
        Self::new(Arc::new(WeightTable::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(scorer: &PatternScorer, text: &str) -> i32 {
        scorer.evaluate_pattern(&Pattern::parse(text).unwrap(), Axis::Horizontal)
    }

    #[test]
    fn test_pattern_monotonicity() {
        let scorer = PatternScorer::default();
        let ladder = [
            "___OOOOO___", // five
            "____OOOO___", // open four
            "XXXXXOOOO__", // closed four
            "_X_OOO__X__", // open three
            "XXXXXOOO___", // closed three
            "XX__OO_X___", // open two
            "XXXXXOO____", // closed two
        ];
        let scores: Vec<i32> = ladder.iter().map(|p| score(&scorer, p)).collect();
        for pair in scores.windows(2) {
            assert!(pair[0] > pair[1], "{scores:?}");
        }
        assert!(scores[6] > 0);
        assert_eq!(score(&scorer, "_____O_____"), 0);
    }

    #[test]
    fn test_diagonal_axis_scores_higher() {
        let scorer = PatternScorer::default();
        let pattern = Pattern::parse("_X_OOO__X__").unwrap();
        let flat = scorer.evaluate_pattern(&pattern, Axis::Vertical);
        let diagonal = scorer.evaluate_pattern(&pattern, Axis::DiagonalUp);
        assert_eq!(flat, 8_000);
        assert_eq!(diagonal, 10_000);
    }

    #[test]
    fn test_evaluate_position_open_three_extensions() {
        let mut board = Board::new();
        for c in 5..=7 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        let before = board.clone();
        let scorer = PatternScorer::default();
        let open_two = scorer.weights().open_two;

        let left = scorer.evaluate_position(&mut board, Pos::new(7, 4), Stone::Black);
        let right = scorer.evaluate_position(&mut board, Pos::new(7, 8), Stone::Black);

        assert!(left > open_two, "left extension scored {left}");
        assert!(right > open_two, "right extension scored {right}");
        assert_eq!(left, scorer.weights().open_four);
        assert_eq!(board, before);
    }

    #[test]
    fn test_evaluate_position_sums_axes() {
        let mut board = Board::new();
        // Closed two on the row and on the column through (1, 1)
        board.place_stone(Pos::new(1, 0), Stone::White);
        board.place_stone(Pos::new(0, 1), Stone::White);
        let scorer = PatternScorer::default();
        let score = scorer.evaluate_position(&mut board, Pos::new(1, 1), Stone::White);
        assert_eq!(score, 2 * scorer.weights().closed_two);
    }

    #[test]
    fn test_shared_weight_table() {
        let weights = Arc::new(WeightTable::default());
        let a = PatternScorer::new(Arc::clone(&weights));
        let b = PatternScorer::new(Arc::clone(&weights));
        assert_eq!(Arc::strong_count(&weights), 3);
        assert_eq!(a.weights(), b.weights());
    }
}
