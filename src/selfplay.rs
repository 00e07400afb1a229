//! Advisor-versus-advisor games

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Tuning;
use crate::eval::WeightTable;
use crate::game::{GameMode, GameResult, GameSession};
use crate::{MoveAdvisor, MoveKind, Pos, Stone, BOARD_SIZE};

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub weights: Arc<WeightTable>,
    pub tuning: Tuning,
    /// Base seed; game `n` uses `seed + n` for both advisors
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            weights: Arc::new(WeightTable::default()),
            tuning: Tuning::default(),
            seed: None,
        }
    }
}

/// One finished game
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<(Stone, Pos, MoveKind)>,
    pub result: GameResult,
}

impl GameRecord {
    pub fn total_moves(&self) -> usize {
        self.moves.len()
    }
}

/// Aggregate over a batch of games
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelfPlaySummary {
    pub games: u32,
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
    pub total_moves: u64,
}

impl SelfPlaySummary {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_moves += game.total_moves() as u64;
        match game.result.winner() {
            Some(Stone::Black) => self.black_wins += 1,
            Some(_) => self.white_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn average_length(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

/// Play one game with the advisor on both sides.
pub fn play_game(config: &SelfPlayConfig, game_index: u32) -> GameRecord {
    let mut advisor = MoveAdvisor::from_parts(Arc::clone(&config.weights), config.tuning.clone());
    if let Some(seed) = config.seed {
        advisor = advisor.with_seed(seed.wrapping_add(u64::from(game_index)));
    }

    let mut session = GameSession::new(GameMode::PvP);
    let mut moves = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

    while !session.is_over() {
        let side = session.current_turn();
        let advice = advisor.advise(session.board(), side);
        let Some(pos) = advice.best_move else {
            break;
        };
        if session.play(pos).is_err() {
            // The advisor only proposes empty cells; stop rather than loop
            break;
        }
        moves.push((side, pos, advice.kind));
    }

    let result = session.outcome().cloned().unwrap_or(GameResult::Draw);
    debug!(game = game_index, moves = moves.len(), ?result, "self-play game finished");
    GameRecord { moves, result }
}

/// Play `games` games in sequence and summarise them
pub fn run(config: &SelfPlayConfig, games: u32) -> SelfPlaySummary {
    let mut summary = SelfPlaySummary::default();
    for index in 0..games {
        let record = play_game(config, index);
        info!(
            game = index + 1,
            of = games,
            moves = record.total_moves(),
            winner = record.result.winner().map_or("none", Stone::name),
            "game done"
        );
        summary.record(&record);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> SelfPlayConfig {
        SelfPlayConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_game_terminates_and_alternates() {
        let record = play_game(&seeded(7), 0);
        assert!(record.total_moves() >= 9, "a five needs at least nine stones");
        assert!(record.total_moves() <= BOARD_SIZE * BOARD_SIZE);

        for (i, (side, _, _)) in record.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Stone::Black } else { Stone::White };
            assert_eq!(*side, expected);
        }
        assert_eq!(record.moves[0].2, MoveKind::Opening);
    }

    #[test]
    fn test_seeded_games_repeat() {
        let a = play_game(&seeded(11), 3);
        let b = play_game(&seeded(11), 3);
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_summary_counts() {
        let summary = run(&seeded(1), 2);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.black_wins + summary.white_wins + summary.draws, 2);
        assert!(summary.average_length() > 0.0);
    }
}
