//! Shape classes and the weight table that prices them
//!
//! The defaults reproduce the tuning the advisor was developed with. Diagonal
//! axes carry their own, higher constants for the mid-strength shapes: a
//! diagonal three or two is easy to overlook on the board and is scored up
//! to match.

use serde::{Deserialize, Serialize};

use crate::board::Axis;

/// Shape classes in descending strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeClass {
    /// `OOOOO`
    Five,
    /// `_OOOO_`, or two open threes on one line
    OpenFour,
    /// `XOOOO_`, `OOO_O`, `OO_OO`
    ClosedFour,
    /// `_OOO_` with room to become an open four, `_O_OO_`
    OpenThree,
    /// `XOOO_`, `XO_OO_`
    ClosedThree,
    /// `_OO_`, `_O_O_`
    OpenTwo,
    /// `XOO_`
    ClosedTwo,
}

/// A classified line: its class and whether it has room on both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub class: ShapeClass,
    /// At least two free cells beyond each end (`__OOO__`)
    pub double_open: bool,
}

impl Shape {
    pub fn new(class: ShapeClass) -> Self {
        Self {
            class,
            double_open: false,
        }
    }

    pub fn double_open(class: ShapeClass) -> Self {
        Self {
            class,
            double_open: true,
        }
    }
}

/// Scores per shape class.
///
/// Immutable once built; advisors share one table through an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub five: i32,
    pub open_four: i32,
    pub closed_four: i32,
    pub open_three: i32,
    pub closed_three: i32,
    pub open_two: i32,
    pub closed_two: i32,
    pub diagonal_open_three: i32,
    pub diagonal_closed_three: i32,
    pub diagonal_open_two: i32,
    /// Multiplier for open threes and twos with room on both sides
    pub double_open_bonus: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            five: 100_000,
            open_four: 50_000,
            closed_four: 10_000,
            open_three: 8_000,
            closed_three: 3_000,
            open_two: 1_000,
            closed_two: 300,
            diagonal_open_three: 10_000,
            diagonal_closed_three: 4_000,
            diagonal_open_two: 1_500,
            double_open_bonus: 1.2,
        }
    }
}

impl WeightTable {
    /// Base weight of a class on the given axis
    pub fn class_weight(&self, class: ShapeClass, axis: Axis) -> i32 {
        let diagonal = axis.is_diagonal();
        match class {
            ShapeClass::Five => self.five,
            ShapeClass::OpenFour => self.open_four,
            ShapeClass::ClosedFour => self.closed_four,
            ShapeClass::OpenThree if diagonal => self.diagonal_open_three,
            ShapeClass::OpenThree => self.open_three,
            ShapeClass::ClosedThree if diagonal => self.diagonal_closed_three,
            ShapeClass::ClosedThree => self.closed_three,
            ShapeClass::OpenTwo if diagonal => self.diagonal_open_two,
            ShapeClass::OpenTwo => self.open_two,
            ShapeClass::ClosedTwo => self.closed_two,
        }
    }

    /// Weight of a shape, bonus included
    pub fn weight(&self, shape: Shape, axis: Axis) -> i32 {
        let base = self.class_weight(shape.class, axis);
        if shape.double_open {
            (f64::from(base) * self.double_open_bonus).round() as i32
        } else {
            base
        }
    }

    /// Checks that orthogonal weights strictly decrease with class strength
    /// and that every diagonal variant is at least its orthogonal weight.
    pub fn validate(&self) -> Result<(), String> {
        let ladder = [
            ("five", self.five),
            ("open_four", self.open_four),
            ("closed_four", self.closed_four),
            ("open_three", self.open_three),
            ("closed_three", self.closed_three),
            ("open_two", self.open_two),
            ("closed_two", self.closed_two),
        ];
        for pair in ladder.windows(2) {
            let (hi_name, hi) = pair[0];
            let (lo_name, lo) = pair[1];
            if hi <= lo {
                return Err(format!("{hi_name} ({hi}) must exceed {lo_name} ({lo})"));
            }
        }
        if self.closed_two <= 0 {
            return Err(format!("closed_two ({}) must be positive", self.closed_two));
        }

        let diagonals = [
            ("diagonal_open_three", self.diagonal_open_three, self.open_three),
            ("diagonal_closed_three", self.diagonal_closed_three, self.closed_three),
            ("diagonal_open_two", self.diagonal_open_two, self.open_two),
        ];
        for (name, diagonal, orthogonal) in diagonals {
            if diagonal < orthogonal {
                return Err(format!("{name} ({diagonal}) is below its orthogonal weight ({orthogonal})"));
            }
        }

        if !(self.double_open_bonus >= 1.0) {
            return Err(format!("double_open_bonus ({}) must be at least 1", self.double_open_bonus));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hierarchy() {
        let w = WeightTable::default();
        assert!(w.five > w.open_four);
        assert!(w.open_four > w.closed_four);
        assert!(w.closed_four > w.open_three);
        assert!(w.open_three > w.closed_three);
        assert!(w.closed_three > w.open_two);
        assert!(w.open_two > w.closed_two);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_diagonal_variants() {
        let w = WeightTable::default();
        assert_eq!(w.class_weight(ShapeClass::OpenThree, Axis::Horizontal), 8_000);
        assert_eq!(w.class_weight(ShapeClass::OpenThree, Axis::DiagonalUp), 10_000);
        assert_eq!(w.class_weight(ShapeClass::ClosedThree, Axis::DiagonalDown), 4_000);
        assert_eq!(w.class_weight(ShapeClass::OpenTwo, Axis::DiagonalDown), 1_500);
        // Fours and fives are axis independent
        assert_eq!(
            w.class_weight(ShapeClass::ClosedFour, Axis::DiagonalDown),
            w.class_weight(ShapeClass::ClosedFour, Axis::Vertical)
        );
    }

    #[test]
    fn test_double_open_bonus() {
        let w = WeightTable::default();
        let plain = w.weight(Shape::new(ShapeClass::OpenThree), Axis::Vertical);
        let wide = w.weight(Shape::double_open(ShapeClass::OpenThree), Axis::Vertical);
        assert_eq!(plain, 8_000);
        assert_eq!(wide, 9_600);
    }

    #[test]
    fn test_validate_rejects_inverted_ladder() {
        let w = WeightTable {
            open_three: 20_000,
            ..WeightTable::default()
        };
        let err = w.validate().unwrap_err();
        assert!(err.contains("closed_four"), "{err}");
    }

    #[test]
    fn test_validate_rejects_weak_diagonal() {
        let w = WeightTable {
            diagonal_open_two: 10,
            ..WeightTable::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let w: WeightTable = serde_json::from_str(r#"{ "closed_two": 250 }"#).unwrap();
        assert_eq!(w.closed_two, 250);
        assert_eq!(w.five, 100_000);
    }
}
