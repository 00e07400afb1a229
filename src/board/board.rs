//! Board structure with scoped trial placement

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::Error;

/// Game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Place a stone for evaluation only.
    ///
    /// The stone is lifted again when the returned guard drops, so every
    /// exit path (including early returns) leaves the board as it was.
    /// `pos` must be empty.
    #[inline]
    pub fn place_scoped(&mut self, pos: Pos, stone: Stone) -> Placement<'_> {
        debug_assert!(self.is_empty(pos), "trial placement on occupied {pos}");
        self.place_stone(pos, stone);
        Placement { board: self, pos }
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(move |&pos| self.is_empty(pos))
    }

    /// Occupied cells in row-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = Pos> {
        self.black.union(&self.white).iter_ones()
    }

    /// Whether any of the eight surrounding cells holds a stone
    pub fn has_neighbor(&self, pos: Pos) -> bool {
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(p) = pos.offset(dr, dc, 1) {
                    if !self.is_empty(p) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A stone placed by [`Board::place_scoped`], removed on drop
pub struct Placement<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl Placement<'_> {
    /// Where the trial stone sits
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.remove_stone(self.pos);
    }
}

/// Text form: one line per row, `.` empty, `X` black, `O` white
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let ch = match self.get(Pos::new(row as u8, col as u8)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses the [`Display`](fmt::Display) form. Spaces inside a row,
    /// blank lines and `#` comment lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut row = 0usize;

        for (line_no, line) in s.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if row >= BOARD_SIZE {
                return Err(Error::BoardParse {
                    line: line_no + 1,
                    reason: format!("more than {BOARD_SIZE} rows"),
                });
            }

            let cells: Vec<char> = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(Error::BoardParse {
                    line: line_no + 1,
                    reason: format!("expected {BOARD_SIZE} cells, found {}", cells.len()),
                });
            }

            for (col, ch) in cells.into_iter().enumerate() {
                let stone = match ch {
                    '.' | '_' => Stone::Empty,
                    'X' | 'x' | 'B' | 'b' => Stone::Black,
                    'O' | 'o' | 'W' | 'w' => Stone::White,
                    other => {
                        return Err(Error::BoardParse {
                            line: line_no + 1,
                            reason: format!("unknown cell '{other}'"),
                        })
                    }
                };
                board.place_stone(Pos::new(row as u8, col as u8), stone);
            }
            row += 1;
        }

        if row != BOARD_SIZE {
            return Err(Error::BoardParse {
                line: s.lines().count(),
                reason: format!("expected {BOARD_SIZE} rows, found {row}"),
            });
        }
        Ok(board)
    }
}
