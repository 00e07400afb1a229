//! Move search layers
//!
//! Each layer answers one question about the position:
//! - [`opening`]: where to start on an empty board
//! - [`immediate`]: is there a move that wins now
//! - [`threat`]: which cell most needs defending
//! - [`attack`]: where to build when nothing is urgent
//!
//! The engine asks them in that order and takes the first answer.

pub mod attack;
pub mod immediate;
pub mod opening;
pub mod threat;

pub use attack::{attack_candidates, find_best_attack_move};
pub use immediate::find_winning_move;
pub use opening::{is_empty_board, opening_move};
pub use threat::{continuity_score, find_blocking_move, is_diagonal_threat};

use crate::board::Pos;

/// A scored cell, alive for one advisor call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub pos: Pos,
    pub score: f64,
}

impl Candidate {
    #[inline]
    pub fn new(pos: Pos, score: f64) -> Self {
        Self { pos, score }
    }
}
