//! Immediate win detection

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};
use crate::rules::check_win;

/// First empty cell, in row-major order, where `side` completes five.
///
/// Each cell is tried with a scoped placement, so the board is unchanged on
/// return whichever way the scan ends.
pub fn find_winning_move(board: &mut Board, side: Stone) -> Option<Pos> {
    for pos in (0..TOTAL_CELLS).map(Pos::from_index) {
        if !board.is_empty(pos) {
            continue;
        }
        let trial = board.place_scoped(pos, side);
        if check_win(&trial, pos, side) {
            return Some(pos);
        }
    }
    None
}
