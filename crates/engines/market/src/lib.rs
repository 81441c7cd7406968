//! Market Engine
//!
//! The Financial Chess opponent. It does not search: every legal move gets a
//! cheap heuristic score (captures, checks, mates, centre control, plus a
//! random tie-break), scaled by active market events on the squares of the
//! player's portfolio pieces. The engine then picks at random inside a
//! difficulty-dependent window of the ranking. Play is therefore
//! non-deterministic and of bounded strength, scaled by tier.
//!
//! All randomness comes from an owned, seedable [`StdRng`] so games can be
//! replayed exactly with [`MarketEngine::with_seed`].

mod difficulty;
mod eval;
mod market;
mod select;

use chess_core::CandidateMove;
use portfolio::SquareAssignment;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

pub use difficulty::*;
pub use eval::*;
pub use market::*;
pub use select::*;


/// Outcome of one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The chosen move
    pub chosen: CandidateMove,
    /// Its score for this ply
    pub score: f64,
    /// Position of the chosen move in the best-first ranking
    pub rank: usize,
    /// Number of legal moves considered
    pub considered: usize,
}

/// Opponent that picks among legal moves by market-weighted heuristic score.
#[derive(Debug, Clone)]
pub struct MarketEngine {
    rng: StdRng,
    difficulty: Difficulty,
}

impl MarketEngine {
    /// Engine seeded from OS entropy.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            difficulty,
        }
    }

    /// Engine with a reproducible random stream.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            difficulty,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Chooses one of `legal`, or `None` if there are no legal moves.
    pub fn select_move(
        &mut self,
        legal: &[CandidateMove],
        board: &SquareAssignment,
        events: &[MarketEvent],
    ) -> Option<CandidateMove> {
        self.select(legal, board, events).map(|s| s.chosen)
    }

    /// Like [`select_move`](Self::select_move) but also reports the score
    /// and rank of the choice.
    pub fn select(
        &mut self,
        legal: &[CandidateMove],
        board: &SquareAssignment,
        events: &[MarketEvent],
    ) -> Option<Selection> {
        if legal.is_empty() {
            return None;
        }

        let ranked = rank_moves(legal, board, events, &mut self.rng);
        let considered = ranked.len();
        let rank = pick_index(considered, self.difficulty, &mut self.rng);
        let ScoredMove { mv, score } = ranked.into_iter().nth(rank)?;

        debug!(
            san = %mv.san,
            score,
            rank,
            considered,
            difficulty = %self.difficulty,
            "opponent move selected"
        );

        Some(Selection {
            chosen: mv,
            score,
            rank,
            considered,
        })
    }

    pub fn name(&self) -> &str {
        "Market v1.0"
    }
}

impl Default for MarketEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
