//! Match runner playing a stand-in player against the market opponent

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use session::{GameOutcome, GameSession, GameStatus, SessionConfig, SessionError};
use tracing::{debug, info};

/// Configuration for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Plies before an unfinished game is scored as a draw
    pub max_plies: u32,
    /// Activate the next feed event every this many plies (0 = never)
    pub event_every: u32,
    /// Base seed; game `i` uses `seed + i`. None plays unseeded games.
    pub seed: Option<u64>,
    /// Print a line per game
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_plies: 200,
            event_every: 10,
            seed: None,
            verbose: true,
        }
    }
}

/// Aggregate result of a match, from the player's point of view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: u32,
    pub seed: Option<u64>,
    pub outcome: GameOutcome,
    /// Final session status; `playing` when the ply limit ended the game
    pub status: GameStatus,
    pub moves: Vec<String>,
    pub final_fen: String,
    /// Feed events activated during the game
    pub events_fired: usize,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    /// True if the game hit the ply limit instead of ending on the board.
    pub fn adjudicated(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Stand-in for the human: plays a uniformly random legal move.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn choose(&mut self, legal: &[String]) -> Option<String> {
        legal.choose(&mut self.rng).cloned()
    }
}

/// Runs matches for one session configuration
pub struct MatchRunner {
    config: MatchConfig,
    session: SessionConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig, session: SessionConfig) -> Self {
        Self { config, session }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Plays every game of the match.
    pub fn run_match(&self) -> Result<(MatchResult, Vec<GameRecord>), SessionError> {
        let mut result = MatchResult::new();
        let mut records = Vec::with_capacity(self.config.num_games as usize);

        for game_num in 0..self.config.num_games {
            let record = self.play_game(game_num)?;
            result.record(record.outcome);

            if self.config.verbose {
                let outcome = match record.outcome {
                    GameOutcome::Win => "1-0",
                    GameOutcome::Loss => "0-1",
                    GameOutcome::Draw => "1/2",
                };
                println!(
                    "Game {}/{}: {} in {} plies{} - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.num_games,
                    outcome,
                    record.plies(),
                    if record.adjudicated() { " (ply limit)" } else { "" },
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
            records.push(record);
        }

        info!(
            wins = result.wins,
            losses = result.losses,
            draws = result.draws,
            "match finished"
        );
        Ok((result, records))
    }

    /// Plays a single game.
    pub fn play_game(&self, game_num: u32) -> Result<GameRecord, SessionError> {
        let seed = self.config.seed.map(|s| s.wrapping_add(game_num as u64));
        let options = self.session.session_options_seeded(seed);
        let mut game = GameSession::new(self.session.initial_fen.as_deref(), options)?;
        // Keep the two random streams apart
        let mut player = RandomPlayer::new(seed.map(|s| s ^ 0x9e37_79b9_7f4a_7c15));
        let mut feed = self.session.events.iter();
        let mut events_fired = 0;

        game.start();
        while !game.is_game_over() && game.move_history().len() < self.config.max_plies as usize {
            if game.is_opponent_turn() {
                if game.make_ai_move()?.is_none() {
                    break;
                }
            } else {
                let Some(choice) = player.choose(&game.legal_moves()) else {
                    break;
                };
                if !game.make_user_move(&choice) {
                    return Err(SessionError::RulesDesync { notation: choice });
                }
            }

            let plies = game.move_history().len() as u32;
            if self.config.event_every > 0 && plies % self.config.event_every == 0 {
                if let Some(event) = feed.next() {
                    debug!(ply = plies, event = %event, "feed event");
                    game.activate_event(event.clone());
                    events_fired += 1;
                }
            }
        }

        Ok(GameRecord {
            game: game_num,
            seed,
            // Ply limit reached: scored as a draw
            outcome: game.game_result().unwrap_or(GameOutcome::Draw),
            status: game.game_status(),
            moves: game.move_history().to_vec(),
            final_fen: game.board_state(),
            events_fired,
        })
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
