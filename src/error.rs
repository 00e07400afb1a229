//! Error types for the outer surfaces: configuration, board text, game session

use thiserror::Error;

use crate::board::Pos;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid advisor configuration: {0}")]
    InvalidConfig(String),

    #[error("board text line {line}: {reason}")]
    BoardParse { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why the game session refused a move
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("game is over")]
    GameOver,

    #[error("cell {0} is occupied")]
    Occupied(Pos),

    #[error("not your turn")]
    NotYourTurn,

    #[error("AI is thinking")]
    AiThinking,
}
