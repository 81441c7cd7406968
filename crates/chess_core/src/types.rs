use serde::{Deserialize, Serialize};

pub use cozy_chess::Square;

/// Side of the board. White always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Back rank of this side (rank index 0 for White, 7 for Black).
    pub fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl From<cozy_chess::Color> for Color {
    fn from(c: cozy_chess::Color) -> Self {
        match c {
            cozy_chess::Color::White => Color::White,
            cozy_chess::Color::Black => Color::Black,
        }
    }
}

impl From<Color> for cozy_chess::Color {
    fn from(c: Color) -> Self {
        match c {
            Color::White => cozy_chess::Color::White,
            Color::Black => cozy_chess::Color::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds, ordered from most to least senior.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// How many of this piece one side starts the game with.
    pub fn standard_count(self) -> usize {
        match self {
            PieceKind::King | PieceKind::Queen => 1,
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight => 2,
            PieceKind::Pawn => 8,
        }
    }

    /// Uppercase SAN letter; pawns have none.
    pub fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl From<cozy_chess::Piece> for PieceKind {
    fn from(p: cozy_chess::Piece) -> Self {
        match p {
            cozy_chess::Piece::Pawn => PieceKind::Pawn,
            cozy_chess::Piece::Knight => PieceKind::Knight,
            cozy_chess::Piece::Bishop => PieceKind::Bishop,
            cozy_chess::Piece::Rook => PieceKind::Rook,
            cozy_chess::Piece::Queen => PieceKind::Queen,
            cozy_chess::Piece::King => PieceKind::King,
        }
    }
}

impl From<PieceKind> for cozy_chess::Piece {
    fn from(p: PieceKind) -> Self {
        match p {
            PieceKind::Pawn => cozy_chess::Piece::Pawn,
            PieceKind::Knight => cozy_chess::Piece::Knight,
            PieceKind::Bishop => cozy_chess::Piece::Bishop,
            PieceKind::Rook => cozy_chess::Piece::Rook,
            PieceKind::Queen => cozy_chess::Piece::Queen,
            PieceKind::King => cozy_chess::Piece::King,
        }
    }
}

/// A legal move as reported by a rules engine for the current ply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateMove {
    /// Kind of the piece being moved
    pub piece: PieceKind,
    pub from: Square,
    /// Destination; castling reports the king's landing square (g1, c8, ...)
    pub to: Square,
    pub promotion: Option<PieceKind>,
    /// Standard Algebraic Notation including `+`/`#` suffixes
    pub san: String,
    /// Coordinate notation, e.g. `e2e4`, `e7e8q`, `e1g1`
    pub uci: String,
    pub is_capture: bool,
    pub is_check: bool,
    pub is_checkmate: bool,
    /// Square of the captured piece. Differs from `to` only for en passant.
    pub captured_square: Option<Square>,
    /// Rook origin and destination when castling.
    pub rook_relocation: Option<(Square, Square)>,
}

impl CandidateMove {
    /// Builds a move from its squares and SAN, inferring the flags from the
    /// SAN text. Used by rules backends and tests that only know notation.
    pub fn new(piece: PieceKind, from: Square, to: Square, san: &str) -> Self {
        let is_capture = san.contains('x');
        Self {
            piece,
            from,
            to,
            promotion: None,
            san: san.to_string(),
            uci: format!("{}{}", from, to),
            is_capture,
            is_check: san.contains('+') || san.contains('#'),
            is_checkmate: san.contains('#'),
            captured_square: if is_capture { Some(to) } else { None },
            rook_relocation: None,
        }
    }

    /// True if the move starts or ends on `sq`.
    pub fn touches(&self, sq: Square) -> bool {
        self.from == sq || self.to == sq
    }
}

impl std::fmt::Display for CandidateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.san)
    }
}

// Helpers
pub fn file_of(sq: Square) -> usize {
    sq.file() as usize
}
pub fn rank_of(sq: Square) -> usize {
    sq.rank() as usize
}
pub fn sq(file: usize, rank: usize) -> Option<Square> {
    if file < 8 && rank < 8 {
        Some(Square::index(rank * 8 + file))
    } else {
        None
    }
}

pub fn coord_to_sq(c: &str) -> Option<Square> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    sq((f - b'a') as usize, (r - b'1') as usize)
}

/// True for the four central squares e4, e5, d4, d5.
pub fn is_center(sq: Square) -> bool {
    matches!(file_of(sq), 3 | 4) && matches!(rank_of(sq), 3 | 4)
}
