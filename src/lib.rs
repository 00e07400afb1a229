//! Gomoku move advisor
//!
//! A rule-based advisor for freestyle Gomoku on a 15x15 board:
//! - Black moves first, five or more in a row wins
//! - No forbidden moves, no captures
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards and scoped placements
//! - [`rules`]: Five-in-a-row detection
//! - [`eval`]: Line pattern classification and weighted scoring
//! - [`search`]: The opening, win, block and attack layers
//! - [`engine`]: [`MoveAdvisor`], which runs the layers in priority order
//! - [`game`]: Turn-taking game session with history and undo
//! - [`selfplay`]: Advisor-versus-advisor games
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use gobang::{Board, MoveAdvisor, MoveKind, Pos, Stone};
//!
//! let mut board = Board::new();
//! for col in 3..7 {
//!     board.place_stone(Pos::new(7, col), Stone::Black);
//! }
//!
//! // Black to move with an open four takes the first winning end
//! let mut advisor = MoveAdvisor::new().with_seed(1);
//! let advice = advisor.advise(&board, Stone::Black);
//! assert_eq!(advice.kind, MoveKind::Win);
//! assert_eq!(advice.best_move, Some(Pos::new(7, 2)));
//! ```
//!
//! # Move Priority
//!
//! 1. Empty board: a cell near the centre
//! 2. A cell that completes five for the side to move
//! 3. The strongest defensive cell, if the threat is at least an open two
//! 4. The best building move next to existing stones

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod selfplay;
pub mod ui;

pub use board::{Axis, Board, Pos, Stone, BOARD_SIZE, CENTER};
pub use config::{AdvisorConfig, Tuning};
pub use engine::{Advice, MoveAdvisor, MoveKind};
pub use error::{Error, MoveError, Result};
pub use eval::{PatternScorer, WeightTable};
pub use game::{GameMode, GameResult, GameSession};
