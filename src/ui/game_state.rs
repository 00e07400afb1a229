//! Game state for the GUI: the session plus the advisor running off-thread

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::config::{AdvisorConfig, Tuning};
use crate::error::MoveError;
use crate::eval::WeightTable;
use crate::game::{GameMode, GameSession};
use crate::{Advice, MoveAdvisor, Pos, Stone};

/// Advisor computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Advice>,
        start_time: Instant,
    },
}

/// Everything the app needs between frames
pub struct GameState {
    pub session: GameSession,
    pub ai_state: AiState,
    pub last_advice: Option<Advice>,
    pub last_ai_time: Option<Duration>,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,

    weights: Arc<WeightTable>,
    tuning: Tuning,
    seed: Option<u64>,
}

impl GameState {
    pub fn new(mode: GameMode, config: AdvisorConfig, seed: Option<u64>) -> Self {
        let (weights, tuning) = config.into_parts();
        Self {
            session: GameSession::new(mode),
            ai_state: AiState::Idle,
            last_advice: None,
            last_ai_time: None,
            suggested_move: None,
            message: None,
            weights,
            tuning,
            seed,
        }
    }

    fn advisor(&self) -> MoveAdvisor {
        let advisor = MoveAdvisor::from_parts(Arc::clone(&self.weights), self.tuning.clone());
        match self.seed {
            // Vary per move so a seeded game is reproducible but not repetitive
            Some(seed) => advisor.with_seed(seed.wrapping_add(self.session.history().len() as u64)),
            None => advisor,
        }
    }

    /// Start a new game in `mode`, dropping any pending advisor result
    pub fn restart(&mut self, mode: GameMode) {
        self.session.set_mode(mode);
        self.ai_state = AiState::Idle;
        self.suggested_move = None;
        self.message = None;
    }

    /// Turn the advisor on (playing White) or off
    pub fn toggle_ai(&mut self) {
        let mode = match self.session.mode() {
            GameMode::PvE { .. } => GameMode::PvP,
            GameMode::PvP => GameMode::PvE { human: Stone::Black },
        };
        self.restart(mode);
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Place the human stone at a clicked cell
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), MoveError> {
        if self.is_ai_thinking() {
            return Err(MoveError::AiThinking);
        }
        self.session.play(pos)?;
        self.suggested_move = None;
        self.message = None;
        Ok(())
    }

    /// Launch the advisor on a worker thread if it is its turn
    pub fn start_ai_thinking(&mut self) {
        if !self.session.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let board = self.session.board().clone();
        let color = self.session.current_turn();
        let mut advisor = self.advisor();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let advice = advisor.advise(&board, color);
            let _ = tx.send(advice);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Apply the advisor's move once it arrives
    pub fn check_ai_result(&mut self) {
        let (advice, elapsed) = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(advice) => (advice, start_time.elapsed()),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    error!("advisor thread exited without a move");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => return,
        };

        self.ai_state = AiState::Idle;
        self.last_ai_time = Some(elapsed);
        debug!(?advice, "advisor replied");

        match advice.best_move {
            Some(pos) => {
                if let Err(err) = self.session.play_ai(pos) {
                    self.message = Some(err.to_string());
                }
            }
            None => self.message = Some("AI could not find a move".to_string()),
        }
        self.last_advice = Some(advice);
    }

    /// Elapsed time of the running advisor call
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Ask the advisor for a hint for the side to move
    pub fn request_suggestion(&mut self) {
        if self.session.is_over() || self.is_ai_thinking() {
            return;
        }
        let advice = self
            .advisor()
            .advise(self.session.board(), self.session.current_turn());
        self.suggested_move = advice.best_move;
        self.last_advice = Some(advice);
    }

    pub fn undo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        self.session.undo();
        self.suggested_move = None;
        self.message = None;
    }
}
