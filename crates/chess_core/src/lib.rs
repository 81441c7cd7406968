//! Chess rules for the Financial Chess engine.
//!
//! The board itself is handled by the `cozy-chess` library; this crate wraps
//! it behind the narrow [`ChessRules`] contract the rest of the workspace
//! programs against, and produces [`CandidateMove`]s carrying SAN, coordinate
//! notation and capture/check flags.

pub mod error;
pub mod notation;
pub mod rules;
pub mod types;

pub use error::RulesError;
pub use rules::CozyRules;
pub use types::*;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// =============================================================================
// Rules trait: the only view the session has of chess mechanics
// =============================================================================

/// Contract of a standard chess-rules engine.
///
/// Implementations own the board. Callers only ever see serialized
/// snapshots and freshly computed move lists.
pub trait ChessRules: Send {
    /// Serialized board (FEN).
    fn current_state(&self) -> String;

    /// All legal moves for the side to move.
    fn legal_moves(&self) -> Vec<CandidateMove>;

    /// Plays a move given in SAN or coordinate notation.
    ///
    /// Returns `None` and leaves the board untouched if the move is illegal
    /// or unparseable.
    fn apply_move(&mut self, notation: &str) -> Option<CandidateMove>;

    fn side_to_move(&self) -> Color;

    /// Squares holding `color`'s pieces of `kind`, ordered by file then rank.
    fn piece_squares(&self, color: Color, kind: PieceKind) -> Vec<Square>;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    /// Any drawn position: stalemate, fifty-move rule, repetition or
    /// insufficient material.
    fn is_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// Restores the position the engine was created with.
    fn reset(&mut self);
}
