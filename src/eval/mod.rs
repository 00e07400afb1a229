//! Pattern evaluation for Gomoku positions
//!
//! A cell is priced per axis: the line through it is read as a [`Pattern`],
//! classified into a [`ShapeClass`] and looked up in the [`WeightTable`].

pub mod line;
pub mod patterns;
pub mod scorer;

pub use line::{Flank, LineShape, Pattern, Symbol, PATTERN_LEN, REACH};
pub use patterns::{Shape, ShapeClass, WeightTable};
pub use scorer::PatternScorer;
