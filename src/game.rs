//! Game session: the driver around the advisor
//!
//! Owns the board and the turn, validates and records moves, detects the end
//! of the game with the same win check the advisor uses, and undoes moves.

use std::fmt;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::board::{Board, Pos, Stone};
use crate::error::MoveError;
use crate::rules::{check_win, winning_line};

/// Who sits at the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs advisor
    PvE { human: Stone },
    /// Two players on one board
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Stone::Black }
    }
}

/// One played move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1-based move number
    pub number: usize,
    pub pos: Pos,
    pub stone: Stone,
    pub played_at: DateTime<Local>,
}

/// `12. black (8, 5) 14:03:22`, coordinates 1-based
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} ({}, {}) {}",
            self.number,
            self.stone.name(),
            self.pos.row + 1,
            self.pos.col + 1,
            self.played_at.format("%H:%M:%S")
        )
    }
}

/// How the game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Win { winner: Stone, line: Vec<Pos> },
    Draw,
}

impl GameResult {
    pub fn winner(&self) -> Option<Stone> {
        match self {
            GameResult::Win { winner, .. } => Some(*winner),
            GameResult::Draw => None,
        }
    }
}

/// Board, turn and history of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    mode: GameMode,
    current_turn: Stone,
    history: Vec<MoveRecord>,
    outcome: Option<GameResult>,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        info!(?mode, "new game");
        Self {
            board: Board::new(),
            mode,
            current_turn: Stone::Black,
            history: Vec::new(),
            outcome: None,
        }
    }

    /// Clear the board, keep the mode. Black moves first.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    /// Switch mode and start over
    pub fn set_mode(&mut self, mode: GameMode) {
        *self = Self::new(mode);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn outcome(&self) -> Option<&GameResult> {
        self.outcome.as_ref()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().map(|r| r.pos)
    }

    /// Color the advisor plays, if any
    pub fn ai_side(&self) -> Option<Stone> {
        match self.mode {
            GameMode::PvE { human } => Some(human.opponent()),
            GameMode::PvP => None,
        }
    }

    pub fn is_human_turn(&self) -> bool {
        self.ai_side() != Some(self.current_turn)
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.ai_side() == Some(self.current_turn)
    }

    /// Human move at `pos`
    pub fn play(&mut self, pos: Pos) -> Result<Option<&GameResult>, MoveError> {
        if !self.is_over() && !self.is_human_turn() {
            warn!(%pos, "move rejected: advisor's turn");
            return Err(MoveError::NotYourTurn);
        }
        self.apply(pos)
    }

    /// Advisor move at `pos`
    pub fn play_ai(&mut self, pos: Pos) -> Result<Option<&GameResult>, MoveError> {
        if !self.is_over() && !self.is_ai_turn() {
            warn!(%pos, "advisor move rejected: not its turn");
            return Err(MoveError::NotYourTurn);
        }
        self.apply(pos)
    }

    fn apply(&mut self, pos: Pos) -> Result<Option<&GameResult>, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            warn!(%pos, "move rejected: occupied");
            return Err(MoveError::Occupied(pos));
        }

        let stone = self.current_turn;
        self.board.place_stone(pos, stone);
        self.history.push(MoveRecord {
            number: self.history.len() + 1,
            pos,
            stone,
            played_at: Local::now(),
        });

        if check_win(&self.board, pos, stone) {
            let line = winning_line(&self.board, pos, stone).unwrap_or_else(|| vec![pos]);
            info!(winner = stone.name(), moves = self.history.len(), "game won");
            self.outcome = Some(GameResult::Win { winner: stone, line });
        } else if self.board.is_full() {
            info!(moves = self.history.len(), "game drawn");
            self.outcome = Some(GameResult::Draw);
        } else {
            self.current_turn = stone.opponent();
        }

        Ok(self.outcome.as_ref())
    }

    /// Take back moves and return how many were removed.
    ///
    /// Against the advisor, undoing after its reply removes the reply and the
    /// human move before it, so the human is to move again.
    pub fn undo(&mut self) -> usize {
        let Some(last) = self.history.last() else {
            return 0;
        };

        let count = match self.ai_side() {
            Some(ai) if last.stone == ai && self.history.len() >= 2 => 2,
            _ => 1,
        };

        for _ in 0..count {
            if let Some(record) = self.history.pop() {
                self.board.remove_stone(record.pos);
                self.current_turn = record.stone;
            }
        }
        self.outcome = None;
        info!(count, remaining = self.history.len(), "undo");
        count
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pvp() -> GameSession {
        GameSession::new(GameMode::PvP)
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = pvp();
        assert_eq!(game.current_turn(), Stone::Black);
        game.play(Pos::new(7, 7)).unwrap();
        assert_eq!(game.current_turn(), Stone::White);
        game.play(Pos::new(7, 8)).unwrap();
        assert_eq!(game.current_turn(), Stone::Black);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.last_move(), Some(Pos::new(7, 8)));
    }

    #[test]
    fn test_occupied_rejected() {
        let mut game = pvp();
        game.play(Pos::new(7, 7)).unwrap();
        assert_eq!(game.play(Pos::new(7, 7)), Err(MoveError::Occupied(Pos::new(7, 7))));
        assert_eq!(game.current_turn(), Stone::White);
    }

    #[test]
    fn test_five_ends_game() {
        let mut game = pvp();
        for c in 0..4 {
            game.play(Pos::new(0, c)).unwrap();
            game.play(Pos::new(1, c)).unwrap();
        }
        let result = game.play(Pos::new(0, 4)).unwrap().cloned();
        match result {
            Some(GameResult::Win { winner, line }) => {
                assert_eq!(winner, Stone::Black);
                assert_eq!(line.len(), 5);
            }
            other => panic!("expected a win, got {other:?}"),
        }
        assert_eq!(game.play(Pos::new(5, 5)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_pve_turn_guard() {
        let mut game = GameSession::new(GameMode::PvE { human: Stone::Black });
        assert!(game.is_human_turn());
        assert_eq!(game.play_ai(Pos::new(0, 0)), Err(MoveError::NotYourTurn));

        game.play(Pos::new(7, 7)).unwrap();
        assert!(game.is_ai_turn());
        assert_eq!(game.play(Pos::new(0, 0)), Err(MoveError::NotYourTurn));
        game.play_ai(Pos::new(7, 8)).unwrap();
        assert!(game.is_human_turn());
    }

    #[test]
    fn test_pve_undo_takes_back_pair() {
        let mut game = GameSession::new(GameMode::PvE { human: Stone::Black });
        game.play(Pos::new(7, 7)).unwrap();
        game.play_ai(Pos::new(7, 8)).unwrap();
        game.play(Pos::new(8, 8)).unwrap();
        game.play_ai(Pos::new(6, 6)).unwrap();

        assert_eq!(game.undo(), 2);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.current_turn(), Stone::Black);
        assert!(game.board().is_empty(Pos::new(8, 8)));
        assert!(game.board().is_empty(Pos::new(6, 6)));
    }

    #[test]
    fn test_pve_undo_while_ai_to_move() {
        let mut game = GameSession::new(GameMode::PvE { human: Stone::Black });
        game.play(Pos::new(7, 7)).unwrap();
        assert_eq!(game.undo(), 1);
        assert!(game.board().is_board_empty());
        assert_eq!(game.current_turn(), Stone::Black);
    }

    #[test]
    fn test_undo_reopens_finished_game() {
        let mut game = pvp();
        for c in 0..4 {
            game.play(Pos::new(0, c)).unwrap();
            game.play(Pos::new(1, c)).unwrap();
        }
        game.play(Pos::new(0, 4)).unwrap();
        assert!(game.is_over());

        assert_eq!(game.undo(), 1);
        assert!(!game.is_over());
        assert_eq!(game.current_turn(), Stone::Black);
        assert_eq!(pvp().undo(), 0);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mode = GameMode::PvE { human: Stone::White };
        let mut game = GameSession::new(mode);
        game.play_ai(Pos::new(7, 7)).unwrap();
        game.reset();
        assert_eq!(game.mode(), mode);
        assert!(game.history().is_empty());
        assert!(game.is_ai_turn());
    }

    #[test]
    fn test_move_record_display() {
        let mut game = pvp();
        game.play(Pos::new(0, 14)).unwrap();
        let line = game.history()[0].to_string();
        assert!(line.starts_with("1. black (1, 15) "), "{line}");
    }
}
