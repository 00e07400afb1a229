//! Move advisor integrating the search layers
//!
//! The advisor answers one question per call: where should `side` play on
//! this board. Layers are consulted in priority order and the first answer
//! wins:
//!
//! 1. **Opening**: empty board, play near the centre
//! 2. **Win**: a cell that completes five
//! 3. **Block**: the cell that best defends against the opponent
//! 4. **Attack**: a building move next to existing stones
//!
//! There is no lookahead beyond the current move. The caller's board is
//! never modified; trial stones go on a private copy and are lifted again
//! by scoped placements.
//!
//! # Example
//!
//! ```
//! use gobang::{Board, MoveAdvisor, Pos, Stone};
//!
//! let mut advisor = MoveAdvisor::new().with_seed(42);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let advice = advisor.advise(&board, Stone::White);
//! println!("{:?} at {:?}", advice.kind, advice.best_move);
//! ```

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

use crate::board::{Board, Pos, Stone};
use crate::config::{AdvisorConfig, Tuning};
use crate::eval::{PatternScorer, WeightTable};
use crate::search;

/// Layer that produced the advice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Near-centre move on an empty board
    Opening,
    /// Completes five in a row
    Win,
    /// Defends against the opponent
    Block,
    /// Builds own shapes next to existing stones
    Attack,
    /// Board is full
    NoMove,
}

/// Result of one advisor call
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    /// Recommended cell; `None` only when the board is full
    pub best_move: Option<Pos>,
    /// Score of the chosen cell in the producing layer's units
    pub score: f64,
    pub kind: MoveKind,
    /// Time taken in microseconds
    pub time_us: u64,
}

impl Advice {
    #[inline]
    fn new(pos: Pos, score: f64, kind: MoveKind, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score,
            kind,
            time_us: start.elapsed().as_micros() as u64,
        }
    }

    #[inline]
    fn no_move(start: Instant) -> Self {
        Self {
            best_move: None,
            score: 0.0,
            kind: MoveKind::NoMove,
            time_us: start.elapsed().as_micros() as u64,
        }
    }
}

/// Heuristic Gomoku move advisor.
///
/// Holds only read-only configuration and a PRNG; no board state survives
/// between calls. The weight table sits behind an `Arc` so advisors can
/// share one.
pub struct MoveAdvisor {
    scorer: PatternScorer,
    tuning: Tuning,
    rng: SmallRng,
}

impl MoveAdvisor {
    /// Advisor with the default configuration and an OS-seeded PRNG
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AdvisorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: AdvisorConfig) -> Self {
        let (weights, tuning) = config.into_parts();
        Self::from_parts(weights, tuning)
    }

    /// Advisor sharing an existing weight table
    #[must_use]
    pub fn from_parts(weights: Arc<WeightTable>, tuning: Tuning) -> Self {
        Self {
            scorer: PatternScorer::new(weights),
            tuning,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Reseed the PRNG so openings and attack tie-breaks are reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    #[inline]
    pub fn scorer(&self) -> &PatternScorer {
        &self.scorer
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Recommended cell for `side`, `None` when the board is full
    #[must_use]
    pub fn get_best_move(&mut self, board: &Board, side: Stone) -> Option<Pos> {
        self.advise(board, side).best_move
    }

    /// Recommended cell with the layer that chose it and its score
    pub fn advise(&mut self, board: &Board, side: Stone) -> Advice {
        debug_assert_ne!(side, Stone::Empty, "advisor must play a color");
        let start = Instant::now();
        let opponent = side.opponent();

        if board.is_full() {
            debug!("board full, no move");
            return Advice::no_move(start);
        }

        if self.is_empty_board(board) {
            let pos = search::opening_move(&mut self.rng, self.tuning.opening_radius);
            debug!(%pos, "opening move");
            return Advice::new(pos, 0.0, MoveKind::Opening, start);
        }

        let mut scratch = board.clone();

        if let Some(pos) = self.find_winning_move(&mut scratch, side) {
            debug!(%pos, side = side.name(), "winning move");
            let score = f64::from(self.scorer.weights().five);
            return Advice::new(pos, score, MoveKind::Win, start);
        }

        if let Some(block) = search::find_blocking_move(
            &mut scratch,
            opponent,
            side,
            &self.scorer,
            &self.tuning,
        ) {
            debug!(pos = %block.pos, score = block.score, "blocking move");
            return Advice::new(block.pos, block.score, MoveKind::Block, start);
        }

        match search::find_best_attack_move(
            &mut scratch,
            side,
            opponent,
            &self.scorer,
            &self.tuning,
            &mut self.rng,
        ) {
            Some(attack) => {
                debug!(pos = %attack.pos, score = attack.score, "attacking move");
                Advice::new(attack.pos, attack.score, MoveKind::Attack, start)
            }
            None => Advice::no_move(start),
        }
    }

    /// True only for a board without stones
    #[inline]
    pub fn is_empty_board(&self, board: &Board) -> bool {
        search::is_empty_board(board)
    }

    /// First cell (row-major) where `side` completes five
    pub fn find_winning_move(&self, board: &mut Board, side: Stone) -> Option<Pos> {
        search::find_winning_move(board, side)
    }

    /// Cell to defend against `opponent`, or `None` when nothing reaches the
    /// open-two weight
    pub fn find_blocking_move(&self, board: &mut Board, opponent: Stone, side: Stone) -> Option<Pos> {
        search::find_blocking_move(board, opponent, side, &self.scorer, &self.tuning)
            .map(|c| c.pos)
    }

    /// Building move for `side` among cells next to existing stones
    pub fn find_best_attack_move(
        &mut self,
        board: &mut Board,
        side: Stone,
        opponent: Stone,
    ) -> Option<Pos> {
        search::find_best_attack_move(
            board,
            side,
            opponent,
            &self.scorer,
            &self.tuning,
            &mut self.rng,
        )
        .map(|c| c.pos)
    }

    /// Pattern score of `side` playing the empty cell `pos`
    pub fn evaluate_position(&self, board: &mut Board, pos: Pos, side: Stone) -> i32 {
        self.scorer.evaluate_position(board, pos, side)
    }
}

impl Default for MoveAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
