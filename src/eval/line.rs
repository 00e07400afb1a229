//! Line patterns and the run/gap classifier
//!
//! A [`Pattern`] is the view from one cell along one axis: five cells in each
//! sense plus the cell itself, each reduced to [`Symbol`]. Classification
//! parses the pattern into the run through the middle and what lies beyond
//! each end ([`Flank`]), then applies the shape rules strongest first.

use crate::board::{Axis, Board, Pos, Stone};

use super::patterns::{Shape, ShapeClass};

/// Cells scanned in each sense
pub const REACH: usize = 5;
/// Symbols in a pattern
pub const PATTERN_LEN: usize = 2 * REACH + 1;
/// Index of the evaluated cell
const MID: usize = REACH;

/// Cell as seen by one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Friend,
    Empty,
    /// Board edge or opposing stone
    Blocked,
}

/// Eleven symbols centred on the evaluated cell, lowest index first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    cells: [Symbol; PATTERN_LEN],
}

impl Pattern {
    /// Read the line through `pos` on `axis` from `side`'s point of view.
    /// `pos` itself is always `Friend`.
    pub fn scan(board: &Board, pos: Pos, axis: Axis, side: Stone) -> Self {
        let (dr, dc) = axis.delta();
        let mut cells = [Symbol::Blocked; PATTERN_LEN];
        cells[MID] = Symbol::Friend;

        for step in 1..=REACH as i32 {
            for sense in [-1, 1] {
                let idx = (MID as i32 + sense * step) as usize;
                cells[idx] = match pos.offset(dr, dc, sense * step) {
                    None => Symbol::Blocked,
                    Some(p) => match board.get(p) {
                        Stone::Empty => Symbol::Empty,
                        s if s == side => Symbol::Friend,
                        _ => Symbol::Blocked,
                    },
                };
            }
        }
        Self { cells }
    }

    /// Parse `O` (friend), `_` (empty), `X` (blocked). Exactly eleven
    /// symbols with `O` in the middle.
    pub fn parse(text: &str) -> Option<Self> {
        let symbols: Vec<Symbol> = text
            .chars()
            .map(|ch| match ch {
                'O' => Some(Symbol::Friend),
                '_' => Some(Symbol::Empty),
                'X' => Some(Symbol::Blocked),
                _ => None,
            })
            .collect::<Option<_>>()?;
        let cells: [Symbol; PATTERN_LEN] = symbols.try_into().ok()?;
        (cells[MID] == Symbol::Friend).then_some(Self { cells })
    }

    #[inline]
    pub fn cells(&self) -> &[Symbol; PATTERN_LEN] {
        &self.cells
    }

    #[inline]
    fn at(&self, idx: isize) -> Symbol {
        if (0..PATTERN_LEN as isize).contains(&idx) {
            self.cells[idx as usize]
        } else {
            Symbol::Blocked
        }
    }

    /// Parse into the run through the middle and its two flanks
    pub fn line_shape(&self) -> LineShape {
        let mid = MID as isize;

        let mut left_run = 0;
        while self.at(mid - left_run - 1) == Symbol::Friend {
            left_run += 1;
        }
        let mut right_run = 0;
        while self.at(mid + right_run + 1) == Symbol::Friend {
            right_run += 1;
        }

        LineShape {
            run: (left_run + right_run + 1) as usize,
            left: self.flank(mid - left_run - 1, -1),
            right: self.flank(mid + right_run + 1, 1),
            open_threes: self.open_threes(),
        }
    }

    fn flank(&self, start: isize, step: isize) -> Flank {
        let open = self.at(start) == Symbol::Empty;

        let mut room = 0;
        while self.at(start + step * room as isize) != Symbol::Blocked {
            room += 1;
        }

        let mut gap_friends = 0;
        let mut gap_open = false;
        if open {
            let mut idx = start + step;
            while self.at(idx) == Symbol::Friend {
                gap_friends += 1;
                idx += step;
            }
            gap_open = gap_friends > 0 && self.at(idx) == Symbol::Empty;
        }

        Flank {
            open,
            room,
            gap_friends,
            gap_open,
        }
    }

    /// Runs of exactly three friends with an empty cell on both sides
    fn open_threes(&self) -> usize {
        let mut count = 0;
        let mut idx = 0isize;
        while idx < PATTERN_LEN as isize {
            if self.at(idx) != Symbol::Friend {
                idx += 1;
                continue;
            }
            let start = idx;
            while self.at(idx) == Symbol::Friend {
                idx += 1;
            }
            if idx - start == 3
                && self.at(start - 1) == Symbol::Empty
                && self.at(idx) == Symbol::Empty
            {
                count += 1;
            }
        }
        count
    }

    /// Classify the pattern; `None` when it holds nothing worth scoring
    pub fn classify(&self) -> Option<Shape> {
        self.line_shape().classify()
    }
}

/// What lies beyond one end of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flank {
    /// The cell right after the run is empty
    pub open: bool,
    /// Unblocked cells (empty or friend) before the edge, an opposing
    /// stone or the end of the pattern
    pub room: usize,
    /// Friends directly after a single empty cell
    pub gap_friends: usize,
    /// Those friends are followed by an empty cell
    pub gap_open: bool,
}

impl Flank {
    /// The run can be completed to `len` by filling the single gap
    #[inline]
    fn bridges_to(&self, run: usize, len: usize) -> bool {
        self.open && self.gap_friends > 0 && run + self.gap_friends >= len
    }
}

/// Parsed pattern: run through the evaluated cell and both flanks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShape {
    pub run: usize,
    pub left: Flank,
    pub right: Flank,
    /// Separate `_OOO_` runs anywhere in the pattern
    pub open_threes: usize,
}

impl LineShape {
    /// Cells available to build five in, run included
    #[inline]
    pub fn span(&self) -> usize {
        self.run + self.left.room + self.right.room
    }

    #[inline]
    fn both_open(&self) -> bool {
        self.left.open && self.right.open
    }

    #[inline]
    fn wide(&self) -> bool {
        self.left.room >= 2 && self.right.room >= 2
    }

    /// Apply the shape rules, strongest first
    pub fn classify(&self) -> Option<Shape> {
        let (run, left, right) = (self.run, self.left, self.right);

        if run >= 5 {
            return Some(Shape::new(ShapeClass::Five));
        }
        // Nothing can grow into five here
        if self.span() < 5 {
            return None;
        }

        if run == 4 && self.both_open() {
            return Some(Shape::new(ShapeClass::OpenFour));
        }
        if self.open_threes >= 2 {
            return Some(Shape::new(ShapeClass::OpenFour));
        }

        if run == 4 || left.bridges_to(run, 4) || right.bridges_to(run, 4) {
            return Some(Shape::new(ShapeClass::ClosedFour));
        }

        if run == 3 && self.both_open() && (left.room >= 2 || right.room >= 2) {
            return Some(if self.wide() {
                Shape::double_open(ShapeClass::OpenThree)
            } else {
                Shape::new(ShapeClass::OpenThree)
            });
        }
        let split_open_three = |gap: Flank, other: Flank| {
            gap.bridges_to(run, 3) && gap.gap_open && other.open
        };
        if split_open_three(left, right) || split_open_three(right, left) {
            return Some(Shape::new(ShapeClass::OpenThree));
        }

        if run == 3 || left.bridges_to(run, 3) || right.bridges_to(run, 3) {
            return Some(Shape::new(ShapeClass::ClosedThree));
        }

        if run == 2 && self.both_open() {
            return Some(if self.wide() {
                Shape::double_open(ShapeClass::OpenTwo)
            } else {
                Shape::new(ShapeClass::OpenTwo)
            });
        }
        let split_open_two = |gap: Flank, other: Flank| {
            run == 1 && gap.gap_friends == 1 && gap.open && gap.gap_open && other.open
        };
        if split_open_two(left, right) || split_open_two(right, left) {
            return Some(Shape::new(ShapeClass::OpenTwo));
        }

        if run == 2 {
            return Some(Shape::new(ShapeClass::ClosedTwo));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(text: &str) -> Option<ShapeClass> {
        Pattern::parse(text)
            .unwrap_or_else(|| panic!("bad pattern {text}"))
            .classify()
            .map(|s| s.class)
    }

    #[test]
    fn test_parse_requires_friend_in_middle() {
        assert!(Pattern::parse("_____O_____").is_some());
        assert!(Pattern::parse("___________").is_none());
        assert!(Pattern::parse("____O").is_none());
        assert!(Pattern::parse("_____O____?").is_none());
    }

    #[test]
    fn test_five_and_overline() {
        assert_eq!(class_of("___OOOOO___"), Some(ShapeClass::Five));
        assert_eq!(class_of("XOOOOOOX___"), Some(ShapeClass::Five));
    }

    #[test]
    fn test_fours() {
        assert_eq!(class_of("____OOOO___"), Some(ShapeClass::OpenFour));
        assert_eq!(class_of("XXXXXOOOO__"), Some(ShapeClass::ClosedFour));
        assert_eq!(class_of("X_OOOOX____"), Some(ShapeClass::ClosedFour));
        // Split fours: filling the gap makes five
        assert_eq!(class_of("___O_OOO___"), Some(ShapeClass::ClosedFour));
        assert_eq!(class_of("__OO_OO____"), Some(ShapeClass::ClosedFour));
        assert_eq!(class_of("_____OOO_O_"), Some(ShapeClass::ClosedFour));
    }

    #[test]
    fn test_blocked_both_sides_is_dead() {
        assert_eq!(class_of("XXXXOOOOX__"), None);
        assert_eq!(class_of("XX_OOOX____"), None);
    }

    #[test]
    fn test_double_three_on_one_line() {
        assert_eq!(class_of("_OOO_OOO___"), Some(ShapeClass::OpenFour));
        // Same line seen from the left three; the shared gap still counts
        assert_eq!(class_of("___OOO_OOO_"), Some(ShapeClass::OpenFour));
    }

    #[test]
    fn test_threes() {
        let open = Pattern::parse("_X_OOO__X__").unwrap().classify();
        assert_eq!(open, Some(Shape::new(ShapeClass::OpenThree)));

        let wide = Pattern::parse("___OOO_____").unwrap().classify();
        assert_eq!(wide, Some(Shape::double_open(ShapeClass::OpenThree)));

        assert_eq!(class_of("___O_OO____"), Some(ShapeClass::OpenThree));
        assert_eq!(class_of("XXXXXOOO___"), Some(ShapeClass::ClosedThree));
        assert_eq!(class_of("XXXO_OO____"), Some(ShapeClass::ClosedThree));
        // Both ends open but one free cell each: never an open four
        assert_eq!(class_of("XX_OOO_X___"), Some(ShapeClass::ClosedThree));
    }

    #[test]
    fn test_twos() {
        let narrow = Pattern::parse("XX__OO_X___").unwrap().classify();
        assert_eq!(narrow, Some(Shape::new(ShapeClass::OpenTwo)));

        let wide = Pattern::parse("____OO_____").unwrap().classify();
        assert_eq!(wide, Some(Shape::double_open(ShapeClass::OpenTwo)));

        assert_eq!(class_of("___O_O_____"), Some(ShapeClass::OpenTwo));
        assert_eq!(class_of("XXXXXOO____"), Some(ShapeClass::ClosedTwo));
        assert_eq!(class_of("_____O_____"), None);
    }

    #[test]
    fn test_scan_edge_is_blocked() {
        let mut board = Board::new();
        for c in 0..4 {
            board.place_stone(Pos::new(0, c), Stone::Black);
        }
        let pattern = Pattern::scan(&board, Pos::new(0, 0), Axis::Horizontal, Stone::Black);
        assert_eq!(pattern.cells()[..MID], [Symbol::Blocked; MID]);
        assert_eq!(pattern.classify(), Some(Shape::new(ShapeClass::ClosedFour)));
    }

    #[test]
    fn test_scan_treats_opponent_as_blocked() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 6), Stone::White);
        board.place_stone(Pos::new(7, 8), Stone::Black);
        let pattern = Pattern::scan(&board, Pos::new(7, 7), Axis::Horizontal, Stone::Black);
        assert_eq!(pattern.cells()[MID - 1], Symbol::Blocked);
        assert_eq!(pattern.cells()[MID], Symbol::Friend);
        assert_eq!(pattern.cells()[MID + 1], Symbol::Friend);
        assert_eq!(pattern.cells()[MID + 2], Symbol::Empty);
    }

    #[test]
    fn test_line_shape_flanks() {
        let shape = Pattern::parse("XX__OO_O___").unwrap().line_shape();
        assert_eq!(shape.run, 2);
        assert_eq!(shape.left.room, 2);
        assert!(shape.left.open);
        assert_eq!(shape.right.gap_friends, 1);
        assert!(shape.right.gap_open);
        assert_eq!(shape.span(), 2 + 2 + 5);
    }
}
