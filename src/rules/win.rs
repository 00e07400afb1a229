//! Win condition checking

use crate::board::{Axis, Board, Pos, Stone};

/// Stones needed in a row to win
pub const WIN_LENGTH: usize = 5;

/// Number of consecutive `color` stones on `axis` through `pos`, counting
/// `pos` itself whatever it holds.
#[inline]
pub fn run_length(board: &Board, pos: Pos, axis: Axis, color: Stone) -> usize {
    let (dr, dc) = axis.delta();
    let mut count = 1;
    for sense in [-1, 1] {
        let mut step = 1;
        while let Some(p) = pos.offset(dr * sense, dc * sense, step) {
            if board.get(p) != color {
                break;
            }
            count += 1;
            step += 1;
        }
    }
    count
}

/// Five-in-a-row check at a specific position.
///
/// Only the four axes through `pos` are scanned. `pos` is taken to hold
/// `color`, so the check works both after a move and for a trial stone.
#[inline]
pub fn check_win(board: &Board, pos: Pos, color: Stone) -> bool {
    Axis::ALL
        .iter()
        .any(|&axis| run_length(board, pos, axis, color) >= WIN_LENGTH)
}

/// The winning stones through `pos`, ordered along the axis
pub fn winning_line(board: &Board, pos: Pos, color: Stone) -> Option<Vec<Pos>> {
    for axis in Axis::ALL {
        let (dr, dc) = axis.delta();

        let mut start = pos;
        while let Some(prev) = start.offset(dr, dc, -1) {
            if board.get(prev) != color {
                break;
            }
            start = prev;
        }

        let mut line = vec![start];
        let mut cur = start;
        while let Some(next) = cur.offset(dr, dc, 1) {
            if next != pos && board.get(next) != color {
                break;
            }
            line.push(next);
            cur = next;
        }

        if line.len() >= WIN_LENGTH {
            return Some(line);
        }
    }
    None
}

/// Check if `color` has five or more in a row anywhere
pub fn has_five_in_row(board: &Board, color: Stone) -> bool {
    let Some(stones) = board.stones(color) else {
        return false;
    };
    stones.iter_ones().any(|pos| check_win(board, pos, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_SIZE;

    fn board_with(stones: &[(u8, u8)], color: Stone) -> Board {
        let mut board = Board::new();
        for &(r, c) in stones {
            board.place_stone(Pos::new(r, c), color);
        }
        board
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let board = board_with(&[(7, 0), (7, 1), (7, 2), (7, 3), (7, 4)], Stone::Black);
        assert!(check_win(&board, Pos::new(7, 2), Stone::Black));
        assert!(has_five_in_row(&board, Stone::Black));
        assert!(!has_five_in_row(&board, Stone::White));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let board = board_with(&[(7, 0), (7, 1), (7, 2), (7, 3)], Stone::Black);
        assert!(!check_win(&board, Pos::new(7, 3), Stone::Black));
        assert!(!has_five_in_row(&board, Stone::Black));
    }

    #[test]
    fn test_overline_wins() {
        let stones: Vec<(u8, u8)> = (2..8).map(|c| (3, c)).collect();
        let board = board_with(&stones, Stone::White);
        assert!(check_win(&board, Pos::new(3, 5), Stone::White));
        assert_eq!(winning_line(&board, Pos::new(3, 5), Stone::White).unwrap().len(), 6);
    }

    #[test]
    fn test_trial_stone_counts_as_own() {
        // (9,9) itself is still empty; check_win treats it as Black
        let board = board_with(&[(5, 5), (6, 6), (7, 7), (8, 8)], Stone::Black);
        assert!(check_win(&board, Pos::new(9, 9), Stone::Black));
        assert!(!check_win(&board, Pos::new(9, 8), Stone::Black));
    }

    #[test]
    fn test_opponent_stone_breaks_run() {
        let mut board = board_with(&[(0, 0), (0, 1), (0, 3), (0, 4)], Stone::Black);
        board.place_stone(Pos::new(0, 2), Stone::White);
        assert!(!check_win(&board, Pos::new(0, 1), Stone::Black));
    }

    #[test]
    fn test_no_wraparound_at_edge() {
        // Three at the end of row 0, two at the start of row 1: index-adjacent only
        let board = board_with(&[(0, 12), (0, 13), (0, 14), (1, 0), (1, 1)], Stone::Black);
        assert!(!has_five_in_row(&board, Stone::Black));
    }

    #[test]
    fn test_win_is_symmetric_under_rotation() {
        let n = BOARD_SIZE as u8 - 1;
        let shapes: [&[(u8, u8)]; 3] = [
            &[(2, 3), (2, 4), (2, 5), (2, 6), (2, 7)],
            &[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)],
            &[(10, 2), (9, 3), (8, 4), (7, 5), (6, 6)],
        ];

        for shape in shapes {
            let mut cells: Vec<(u8, u8)> = shape.to_vec();
            for _ in 0..4 {
                let board = board_with(&cells, Stone::White);
                for &(r, c) in &cells {
                    assert!(check_win(&board, Pos::new(r, c), Stone::White), "{cells:?}");
                }
                // Rotate 90 degrees: (r, c) -> (c, n - r)
                cells = cells.iter().map(|&(r, c)| (c, n - r)).collect();
            }

            // Mirror left-right
            let mirrored: Vec<(u8, u8)> = shape.iter().map(|&(r, c)| (r, n - c)).collect();
            let board = board_with(&mirrored, Stone::White);
            assert!(check_win(&board, Pos::new(mirrored[2].0, mirrored[2].1), Stone::White));
        }
    }

    #[test]
    fn test_winning_line_order() {
        let board = board_with(&[(4, 10), (5, 9), (6, 8), (7, 7), (8, 6)], Stone::Black);
        let line = winning_line(&board, Pos::new(6, 8), Stone::Black).unwrap();
        assert_eq!(line.first(), Some(&Pos::new(4, 10)));
        assert_eq!(line.last(), Some(&Pos::new(8, 6)));
    }
}
