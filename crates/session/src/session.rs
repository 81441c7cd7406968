//! Game session controller.
//!
//! A [`GameSession`] is the only writer of its board. It sequences player
//! and opponent moves, keeps the move history, follows the portfolio pieces
//! around the board, and decides when the game is over.
//!
//! ```text
//! setup ──(first move / start)──▶ playing ──(move ends game)──▶ checkmate_win
//!   ▲                                                          checkmate_loss
//!   └──────────────────────── reset ◀───────────────────────── stalemate / draw
//! ```

use chess_core::{ChessRules, Color, CozyRules};
use market_engine::{Difficulty, MarketEngine, MarketEvent};
use portfolio::{AssetMapping, SquareAssignment};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SessionError;
use crate::events::{Mover, SessionEvent};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Setup,
    Playing,
    /// The opponent was mated
    CheckmateWin,
    /// The player was mated
    CheckmateLoss,
    Stalemate,
    /// Fifty-move rule, repetition or insufficient material
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::CheckmateWin
                | GameStatus::CheckmateLoss
                | GameStatus::Stalemate
                | GameStatus::Draw
        )
    }

    /// Result from the player's point of view, once the game is over.
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameStatus::CheckmateWin => Some(GameOutcome::Win),
            GameStatus::CheckmateLoss => Some(GameOutcome::Loss),
            GameStatus::Stalemate | GameStatus::Draw => Some(GameOutcome::Draw),
            GameStatus::Setup | GameStatus::Playing => None,
        }
    }
}

/// Final result from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

/// Per-session settings.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub difficulty: Difficulty,
    /// Events active from the start, keyed by symbol
    pub events: Vec<MarketEvent>,
    /// Output of [`portfolio::map_portfolio`]
    pub mapping: Vec<AssetMapping>,
    /// Side the player controls; the opponent plays the other one
    pub human_side: Color,
    /// Seed for the opponent's random stream (None = entropy)
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            events: Vec::new(),
            mapping: Vec::new(),
            human_side: Color::White,
            seed: None,
        }
    }
}

/// Creates a session on the standard board or on `initial_state` (FEN).
///
/// A malformed FEN fails the construction.
pub fn create_session(
    initial_state: Option<&str>,
    options: SessionOptions,
) -> Result<GameSession, SessionError> {
    GameSession::new(initial_state, options)
}

/// A single game between the player and the market opponent.
pub struct GameSession {
    id: Uuid,
    rules: Box<dyn ChessRules>,
    engine: MarketEngine,
    mapping: Vec<AssetMapping>,
    /// Binding at construction, restored on reset
    initial_board: SquareAssignment,
    board: SquareAssignment,
    events: Vec<MarketEvent>,
    human: Color,
    status: GameStatus,
    history: Vec<String>,
    outbox: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(initial_state: Option<&str>, options: SessionOptions) -> Result<Self, SessionError> {
        let rules = match initial_state {
            Some(fen) => CozyRules::from_fen(fen)?,
            None => CozyRules::new(),
        };
        Ok(Self::with_rules(Box::new(rules), options))
    }

    /// Builds a session over any rules backend. The backend must be in the
    /// position the session should reset to.
    pub fn with_rules(rules: Box<dyn ChessRules>, options: SessionOptions) -> Self {
        let engine = match options.seed {
            Some(seed) => MarketEngine::with_seed(options.difficulty, seed),
            None => MarketEngine::new(options.difficulty),
        };
        let board = SquareAssignment::bind(&options.mapping, options.human_side, rules.as_ref());

        let mut session = Self {
            id: Uuid::new_v4(),
            rules,
            engine,
            mapping: options.mapping,
            initial_board: board.clone(),
            board,
            events: Vec::new(),
            human: options.human_side,
            status: GameStatus::Setup,
            history: Vec::new(),
            outbox: Vec::new(),
        };
        for event in options.events {
            session.upsert_event(event);
        }
        debug!(
            session = %session.id,
            bound = session.board.len(),
            human = ?session.human,
            "session created"
        );
        session
    }

    pub fn session_id(&self) -> Uuid {
        self.id
    }

    /// Serialized board (FEN).
    pub fn board_state(&self) -> String {
        self.rules.current_state()
    }

    /// SAN of every legal move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<String> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.rules.legal_moves().into_iter().map(|m| m.san).collect()
    }

    pub fn game_status(&self) -> GameStatus {
        self.status
    }

    pub fn human_side(&self) -> Color {
        self.human
    }

    pub fn side_to_move(&self) -> Color {
        self.rules.side_to_move()
    }

    pub fn is_opponent_turn(&self) -> bool {
        !self.status.is_terminal() && self.rules.side_to_move() != self.human
    }

    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.engine.set_difficulty(difficulty);
    }

    pub fn mapping(&self) -> &[AssetMapping] {
        &self.mapping
    }

    /// Where the portfolio symbols currently stand.
    pub fn assignment(&self) -> &SquareAssignment {
        &self.board
    }

    pub fn move_history(&self) -> &[String] {
        &self.history
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// `None` unless the game is over.
    pub fn game_result(&self) -> Option<GameOutcome> {
        self.status.outcome()
    }

    /// Leaves `setup` without making a move. Returns false if the game had
    /// already started or finished.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Setup {
            return false;
        }
        self.status = GameStatus::Playing;
        self.outbox.push(SessionEvent::Started);
        true
    }

    /// Plays the player's move (SAN or coordinate notation).
    ///
    /// Returns false and changes nothing if the move is illegal, it is not
    /// the player's turn, or the game is over.
    pub fn make_user_move(&mut self, notation: &str) -> bool {
        if self.status.is_terminal() {
            debug!(input = notation, "move rejected: game is over");
            return false;
        }
        if self.rules.side_to_move() != self.human {
            debug!(input = notation, "move rejected: opponent to move");
            return false;
        }
        match self.rules.apply_move(notation) {
            Some(played) => {
                self.record(played, Mover::Human);
                true
            }
            None => {
                debug!(input = notation, "move rejected: illegal");
                false
            }
        }
    }

    /// Lets the opponent choose and play a move.
    ///
    /// Returns `Ok(None)` without touching the board when there is no legal
    /// move or the game is over; callers must not retry in that case.
    /// Asking on the player's turn is an error and plays nothing.
    pub fn make_ai_move(&mut self) -> Result<Option<String>, SessionError> {
        if self.status.is_terminal() {
            return Ok(None);
        }
        let legal = self.rules.legal_moves();
        if legal.is_empty() {
            return Ok(None);
        }
        if self.rules.side_to_move() == self.human {
            return Err(SessionError::NotOpponentTurn);
        }

        let Some(chosen) = self.engine.select_move(&legal, &self.board, &self.events) else {
            return Ok(None);
        };
        let played = self
            .rules
            .apply_move(&chosen.uci)
            .ok_or_else(|| SessionError::RulesDesync {
                notation: chosen.uci.clone(),
            })?;
        let san = played.san.clone();
        self.record(played, Mover::Opponent);
        Ok(Some(san))
    }

    /// Activates a market event, replacing any active event for the same
    /// symbol.
    pub fn activate_event(&mut self, event: MarketEvent) {
        debug!(event = %event, "market event activated");
        self.upsert_event(event.clone());
        self.outbox.push(SessionEvent::MarketEventActivated { event });
    }

    /// Drops the active event for `symbol`. Returns false if there was none.
    pub fn clear_event(&mut self, symbol: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| !e.symbol.eq_ignore_ascii_case(symbol));
        let removed = self.events.len() != before;
        if removed {
            self.outbox.push(SessionEvent::MarketEventCleared {
                symbol: symbol.to_string(),
            });
        }
        removed
    }

    pub fn clear_events(&mut self) {
        let symbols: Vec<String> = self.events.drain(..).map(|e| e.symbol).collect();
        for symbol in symbols {
            self.outbox.push(SessionEvent::MarketEventCleared { symbol });
        }
    }

    pub fn active_events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Back to the initial board with an empty history and `setup` status.
    /// Active market events are kept.
    pub fn reset(&mut self) {
        self.rules.reset();
        self.history.clear();
        self.board = self.initial_board.clone();
        self.status = GameStatus::Setup;
        self.outbox.push(SessionEvent::Reset);
        info!(session = %self.id, "session reset");
    }

    /// Takes the queued notifications.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn upsert_event(&mut self, event: MarketEvent) {
        match self
            .events
            .iter_mut()
            .find(|e| e.symbol.eq_ignore_ascii_case(&event.symbol))
        {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    fn record(&mut self, played: chess_core::CandidateMove, mover: Mover) {
        let side = match mover {
            Mover::Human => self.human,
            Mover::Opponent => self.human.other(),
        };
        self.board.track(&played, side);

        if self.status == GameStatus::Setup {
            self.status = GameStatus::Playing;
            self.outbox.push(SessionEvent::Started);
        }

        debug!(session = %self.id, mover = ?mover, san = %played.san, "move recorded");
        self.history.push(played.san.clone());
        self.outbox.push(SessionEvent::MoveApplied {
            mover,
            san: played.san,
            fen: self.rules.current_state(),
        });

        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        let status = if self.rules.is_checkmate() {
            // The side to move is the mated side
            if self.rules.side_to_move() == self.human {
                GameStatus::CheckmateLoss
            } else {
                GameStatus::CheckmateWin
            }
        } else if self.rules.is_stalemate() {
            GameStatus::Stalemate
        } else if self.rules.is_draw() {
            GameStatus::Draw
        } else {
            return;
        };

        self.status = status;
        info!(session = %self.id, ?status, plies = self.history.len(), "game over");
        self.outbox.push(SessionEvent::GameOver { status });
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("fen", &self.rules.current_state())
            .field("status", &self.status)
            .field("human", &self.human)
            .field("plies", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
