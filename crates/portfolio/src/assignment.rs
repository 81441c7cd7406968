//! Binding of mapped symbols to the squares of the player's pieces.

use chess_core::{CandidateMove, ChessRules, Color, PieceKind, Square};

use crate::mapper::AssetMapping;

/// Which square currently carries each mapped symbol.
///
/// Built once from the mapping and the starting position, then updated as
/// moves are played so a symbol keeps following its piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareAssignment {
    side: Color,
    /// (symbol, square) in mapping order
    squares: Vec<(String, Square)>,
}

impl SquareAssignment {
    pub fn empty(side: Color) -> Self {
        Self {
            side,
            squares: Vec::new(),
        }
    }

    /// Binds each mapping to a square holding one of `side`'s pieces of the
    /// mapped kind. Squares are handed out in file order, so on the standard
    /// board the two rooks get a1 then h1. Mappings left without a matching
    /// piece stay unbound.
    pub fn bind(mappings: &[AssetMapping], side: Color, rules: &dyn ChessRules) -> Self {
        let mut squares = Vec::new();
        for kind in PieceKind::ALL {
            let available = rules.piece_squares(side, kind);
            let symbols = mappings.iter().filter(|m| m.piece == kind);
            for (mapping, square) in symbols.zip(available) {
                squares.push((mapping.symbol.clone(), square));
            }
        }
        Self { side, squares }
    }

    /// Builds an assignment from explicit pairs.
    pub fn from_pairs(side: Color, pairs: impl IntoIterator<Item = (String, Square)>) -> Self {
        Self {
            side,
            squares: pairs.into_iter().collect(),
        }
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn square_of(&self, symbol: &str) -> Option<Square> {
        self.squares
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
            .map(|(_, sq)| *sq)
    }

    pub fn symbol_at(&self, square: Square) -> Option<&str> {
        self.squares
            .iter()
            .find(|(_, sq)| *sq == square)
            .map(|(s, _)| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Square)> {
        self.squares.iter().map(|(s, sq)| (s.as_str(), *sq))
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Follows a played move: our pieces carry their symbol along (the rook
    /// too when castling), and a captured piece loses its symbol.
    pub fn track(&mut self, mv: &CandidateMove, mover: Color) {
        if mover == self.side {
            self.relocate(mv.from, mv.to);
            if let Some((rook_from, rook_to)) = mv.rook_relocation {
                self.relocate(rook_from, rook_to);
            }
        } else if let Some(captured) = mv.captured_square {
            self.squares.retain(|(_, sq)| *sq != captured);
        }
    }

    fn relocate(&mut self, from: Square, to: Square) {
        if let Some(entry) = self.squares.iter_mut().find(|(_, sq)| *sq == from) {
            entry.1 = to;
        }
    }
}

#[cfg(test)]
#[path = "assignment_tests.rs"]
mod assignment_tests;
