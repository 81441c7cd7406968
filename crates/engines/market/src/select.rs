//! Difficulty-windowed move selection over a score ranking.

use chess_core::CandidateMove;
use portfolio::SquareAssignment;
use rand::Rng;

use crate::difficulty::Difficulty;
use crate::eval::score_move;
use crate::market::MarketEvent;

/// A candidate move with its score for this ply.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMove {
    pub mv: CandidateMove,
    pub score: f64,
}

/// Scores every move and sorts best first. Equal scores keep their
/// generation order.
pub fn rank_moves<R: Rng + ?Sized>(
    legal: &[CandidateMove],
    board: &SquareAssignment,
    events: &[MarketEvent],
    rng: &mut R,
) -> Vec<ScoredMove> {
    let mut scored: Vec<ScoredMove> = legal
        .iter()
        .map(|mv| ScoredMove {
            mv: mv.clone(),
            score: score_move(mv, board, events, rng),
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Picks an index into a ranking of `n` moves, uniformly inside the
/// difficulty window. An empty window falls back to the top move.
///
/// `n` must be non-zero.
pub fn pick_index<R: Rng + ?Sized>(n: usize, difficulty: Difficulty, rng: &mut R) -> usize {
    let window = difficulty.window(n);
    if window.is_empty() {
        0
    } else {
        rng.gen_range(window)
    }
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod select_tests;
