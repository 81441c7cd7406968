//! Standard Algebraic Notation and coordinate notation helpers.

use cozy_chess::{Board, Move, Square};

use crate::types::*;

/// Builds the SAN text for a legal move, without the check suffix.
///
/// `legal` must be the full legal-move list of `board`; it is used for
/// disambiguation when two pieces of the same kind can reach `to`.
pub fn san_body(
    board: &Board,
    mv: Move,
    piece: PieceKind,
    to: Square,
    is_capture: bool,
    is_castle: bool,
    legal: &[Move],
) -> String {
    if is_castle {
        return if file_of(to) == 6 {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let mut san = String::new();
    match piece.san_letter() {
        Some(letter) => {
            san.push(letter);
            if piece != PieceKind::King {
                san.push_str(&disambiguation(board, mv, legal));
            }
        }
        None => {
            if is_capture {
                san.push(file_char(mv.from));
            }
        }
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&to.to_string());

    if let Some(promo) = mv.promotion.and_then(|p| PieceKind::from(p).san_letter()) {
        san.push('=');
        san.push(promo);
    }

    san
}

/// Coordinate notation for a move landing on `to` (castling uses the king's
/// landing square, not the rook square).
pub fn coordinate(mv: Move, to: Square) -> String {
    let mut s = format!("{}{}", mv.from, to);
    if let Some(promo) = mv.promotion.and_then(|p| PieceKind::from(p).san_letter()) {
        s.push(promo.to_ascii_lowercase());
    }
    s
}

/// Strips annotation suffixes and normalises zero-castling so user input can
/// be compared against generated SAN.
pub fn normalize(input: &str) -> String {
    let trimmed = input
        .trim()
        .trim_end_matches("e.p.")
        .trim_end()
        .trim_end_matches(['+', '#', '!', '?']);
    match trimmed {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        other => other.to_string(),
    }
}

fn disambiguation(board: &Board, mv: Move, legal: &[Move]) -> String {
    let mover = board.piece_on(mv.from);
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|o| o.to == mv.to && o.from != mv.from && board.piece_on(o.from) == mover)
        .map(|o| o.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let shares_file = rivals.iter().any(|s| s.file() == mv.from.file());
    let shares_rank = rivals.iter().any(|s| s.rank() == mv.from.rank());

    if !shares_file {
        file_char(mv.from).to_string()
    } else if !shares_rank {
        rank_char(mv.from).to_string()
    } else {
        mv.from.to_string()
    }
}

fn file_char(sq: Square) -> char {
    (b'a' + file_of(sq) as u8) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + rank_of(sq) as u8) as char
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
