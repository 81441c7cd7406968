//! Heuristic move scoring with market-event influence.

use chess_core::{is_center, CandidateMove};
use portfolio::SquareAssignment;
use rand::Rng;

use crate::market::MarketEvent;

pub const CAPTURE_BONUS: f64 = 20.0;
pub const CHECK_BONUS: f64 = 15.0;
pub const MATE_BONUS: f64 = 1000.0;
pub const CENTER_BONUS: f64 = 5.0;

/// Upper bound (exclusive) of the random component of every score.
pub const NOISE_RANGE: f64 = 10.0;

/// Score of a move before market influence.
///
/// `noise` is the random tie-break in `[0, NOISE_RANGE)`. Check and mate
/// bonuses are read from the SAN suffix.
pub fn base_score(mv: &CandidateMove, noise: f64) -> f64 {
    let mut score = noise;
    if mv.is_capture {
        score += CAPTURE_BONUS;
    }
    if mv.san.contains('+') {
        score += CHECK_BONUS;
    }
    if mv.san.contains('#') {
        score += MATE_BONUS;
    }
    if is_center(mv.to) {
        score += CENTER_BONUS;
    }
    score
}

/// Product of the multipliers of every event whose symbol sits on the
/// move's origin or destination square, applied in event order.
pub fn event_multiplier(mv: &CandidateMove, board: &SquareAssignment, events: &[MarketEvent]) -> f64 {
    events
        .iter()
        .filter(|event| {
            board
                .square_of(&event.symbol)
                .map_or(false, |sq| mv.touches(sq))
        })
        .fold(1.0, |acc, event| acc * event.multiplier())
}

/// Full score of a move: noisy base score times market influence.
pub fn score_move<R: Rng + ?Sized>(
    mv: &CandidateMove,
    board: &SquareAssignment,
    events: &[MarketEvent],
    rng: &mut R,
) -> f64 {
    let noise = rng.gen_range(0.0..NOISE_RANGE);
    base_score(mv, noise) * event_multiplier(mv, board, events)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
