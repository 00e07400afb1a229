//! Game rules for Gomoku
//!
//! Free-style five-in-a-row: five or more consecutive stones on any axis win.
//! The same check serves the game session and the advisor's win detector.

pub mod win;

// Re-exports for convenient access
pub use win::{check_win, has_five_in_row, run_length, winning_line};
