//! Opening move on an empty board

use rand::Rng;

use crate::board::{Board, Pos, CENTER};

/// True only when no stone has been played
#[inline]
pub fn is_empty_board(board: &Board) -> bool {
    board.is_board_empty()
}

/// Centre cell shifted by a random offset in `[-radius, radius]` on each axis
pub fn opening_move<R: Rng + ?Sized>(rng: &mut R, radius: u8) -> Pos {
    let r = i32::from(radius);
    let dr = rng.random_range(-r..=r);
    let dc = rng.random_range(-r..=r);
    CENTER.offset(dr, dc, 1).unwrap_or(CENTER)
}
