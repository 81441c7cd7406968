//! [`ChessRules`] implementation backed by the `cozy-chess` move generator.

use cozy_chess::{Board, GameStatus, Move, Piece};
use tracing::debug;

use crate::error::RulesError;
use crate::notation;
use crate::types::*;
use crate::ChessRules;

/// Rules engine over a `cozy_chess::Board`.
///
/// Tracks the position it was created from (so [`ChessRules::reset`] can
/// restore it) and the hash of every position reached since then, for
/// threefold-repetition detection.
#[derive(Clone, Debug)]
pub struct CozyRules {
    initial: Board,
    board: Board,
    history: Vec<u64>,
}

impl Default for CozyRules {
    fn default() -> Self {
        Self::new()
    }
}

impl CozyRules {
    /// Standard starting position.
    pub fn new() -> Self {
        Self::with_board(Board::default())
    }

    /// Parses a FEN string. A malformed FEN is an error, never a silent
    /// fallback to the starting position.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let board = Board::from_fen(fen.trim(), false).map_err(|e| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(Self::with_board(board))
    }

    fn with_board(board: Board) -> Self {
        let history = vec![board.hash()];
        Self {
            initial: board.clone(),
            board,
            history,
        }
    }

    pub fn halfmove_clock(&self) -> u8 {
        self.board.halfmove_clock()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    /// True once the current position has occurred three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.board.hash();
        self.history.iter().filter(|&&h| h == current).count() >= 3
    }

    /// Bare kings, a single minor piece, or bishops that all stand on one
    /// square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }

        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 {
            return true;
        }
        if !knights.is_empty() {
            return false;
        }

        let mut shades = bishops.into_iter().map(|s| (file_of(s) + rank_of(s)) % 2);
        match shades.next() {
            Some(first) => shades.all(|shade| shade == first),
            None => true,
        }
    }

    fn raw_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    fn has_legal_move(&self) -> bool {
        self.board.generate_moves(|piece_moves| !piece_moves.is_empty())
    }

    /// Legal moves paired with the library move used to play them.
    fn legal_pairs(&self) -> Vec<(Move, CandidateMove)> {
        let raw = self.raw_moves();
        raw.iter()
            .filter_map(|&mv| self.describe(mv, &raw).map(|c| (mv, c)))
            .collect()
    }

    fn describe(&self, mv: Move, legal: &[Move]) -> Option<CandidateMove> {
        let board = &self.board;
        let us = board.side_to_move();
        let them: cozy_chess::Color = Color::from(us).other().into();
        let piece = PieceKind::from(board.piece_on(mv.from)?);

        // cozy-chess encodes castling as the king capturing its own rook
        let is_castle = piece == PieceKind::King && board.color_on(mv.to) == Some(us);
        let (to, rook_relocation) = if is_castle {
            let rank = rank_of(mv.from);
            let (king_file, rook_file) = if file_of(mv.to) > file_of(mv.from) {
                (6, 5)
            } else {
                (2, 3)
            };
            (sq(king_file, rank)?, Some((mv.to, sq(rook_file, rank)?)))
        } else {
            (mv.to, None)
        };

        let captured_square = if is_castle {
            None
        } else if board.color_on(mv.to) == Some(them) {
            Some(mv.to)
        } else if piece == PieceKind::Pawn && file_of(mv.from) != file_of(mv.to) {
            sq(file_of(mv.to), rank_of(mv.from))
        } else {
            None
        };
        let is_capture = captured_square.is_some();

        let mut after = board.clone();
        after.try_play(mv).ok()?;
        let is_checkmate = after.status() == GameStatus::Won;
        let is_check = !after.checkers().is_empty();

        let mut san = notation::san_body(board, mv, piece, to, is_capture, is_castle, legal);
        if is_checkmate {
            san.push('#');
        } else if is_check {
            san.push('+');
        }

        Some(CandidateMove {
            piece,
            from: mv.from,
            to,
            promotion: mv.promotion.map(PieceKind::from),
            san,
            uci: notation::coordinate(mv, to),
            is_capture,
            is_check,
            is_checkmate,
            captured_square,
            rook_relocation,
        })
    }

    /// Resolves SAN first, then coordinate notation.
    fn resolve(&self, input: &str) -> Option<(Move, CandidateMove)> {
        let wanted = notation::normalize(input);
        if wanted.is_empty() {
            return None;
        }
        let pairs = self.legal_pairs();
        if let Some(i) = pairs
            .iter()
            .position(|(_, c)| notation::normalize(&c.san) == wanted)
        {
            return pairs.into_iter().nth(i);
        }
        pairs
            .into_iter()
            .find(|(_, c)| c.uci.eq_ignore_ascii_case(&wanted))
    }
}

impl ChessRules for CozyRules {
    fn current_state(&self) -> String {
        self.board.to_string()
    }

    fn legal_moves(&self) -> Vec<CandidateMove> {
        self.legal_pairs().into_iter().map(|(_, c)| c).collect()
    }

    fn apply_move(&mut self, notation: &str) -> Option<CandidateMove> {
        let (mv, candidate) = self.resolve(notation)?;
        self.board.try_play(mv).ok()?;
        self.history.push(self.board.hash());
        debug!(san = %candidate.san, fen = %self.board, "move applied");
        Some(candidate)
    }

    fn side_to_move(&self) -> Color {
        self.board.side_to_move().into()
    }

    fn piece_squares(&self, color: Color, kind: PieceKind) -> Vec<Square> {
        let mut squares: Vec<Square> = self
            .board
            .colored_pieces(color.into(), kind.into())
            .into_iter()
            .collect();
        squares.sort_by_key(|&s| (file_of(s), rank_of(s)));
        squares
    }

    fn is_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.is_fifty_move_draw()
            || self.is_threefold_repetition()
            || self.is_insufficient_material()
    }

    fn reset(&mut self) {
        self.board = self.initial.clone();
        self.history.clear();
        self.history.push(self.board.hash());
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
