//! The `ChessMove` value type.
//!
//! Moves are built fresh by the generators for each query and are immutable
//! afterwards. The captured piece is read from the board at construction time
//! and special-cased for en passant, where the captured pawn sits beside the
//! destination rather than on it.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

/// A single move.
///
/// Equality and hashing use only the start and end squares. Promotion always
/// yields a queen, so no two legal moves in one position share both squares;
/// the flags are therefore not part of the identity.
#[derive(Debug, Clone, Copy)]
pub struct ChessMove {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub is_promotion: bool,
}

impl ChessMove {
    /// Ordinary move or capture of `piece` from `start` to `end` on `board`.
    pub fn new(start: Square, end: Square, piece: Piece, board: &Board) -> Self {
        let is_promotion =
            piece.kind == PieceKind::Pawn && end.row == piece.color.promotion_row();
        Self {
            start,
            end,
            piece_moved: piece,
            piece_captured: board[end.row as usize][end.col as usize],
            is_en_passant: false,
            is_castle: false,
            is_promotion,
        }
    }

    /// En passant capture; the captured pawn is the opponent's pawn beside `start`.
    pub fn en_passant(start: Square, end: Square, piece: Piece) -> Self {
        Self {
            start,
            end,
            piece_moved: piece,
            piece_captured: Some(Piece::new(piece.color.opposite(), PieceKind::Pawn)),
            is_en_passant: true,
            is_castle: false,
            is_promotion: false,
        }
    }

    /// Castling, expressed as the king's two-square move.
    pub fn castle(start: Square, end: Square, king: Piece) -> Self {
        Self {
            start,
            end,
            piece_moved: king,
            piece_captured: None,
            is_en_passant: false,
            is_castle: true,
            is_promotion: false,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    #[inline]
    pub fn is_kingside_castle(&self) -> bool {
        self.is_castle && self.end.col > self.start.col
    }

    /// Square the captured piece stood on (differs from `end` only for en passant).
    #[inline]
    pub fn capture_square(&self) -> Square {
        if self.is_en_passant {
            Square::new(self.start.row, self.end.col)
        } else {
            self.end
        }
    }

    /// Numeric identity built from the start and end squares only.
    #[inline]
    pub fn move_id(&self) -> u16 {
        (self.start.row as u16) * 1000
            + (self.start.col as u16) * 100
            + (self.end.row as u16) * 10
            + self.end.col as u16
    }

    /// Human-readable notation: `Nf3`, `exd5`, `Bxc6`, `0-0`, `0-0-0`,
    /// `e8Q`, `dxe8Q`, `exd6 e.p.`.
    pub fn notation(&self) -> String {
        if self.is_castle {
            return if self.is_kingside_castle() {
                "0-0".to_owned()
            } else {
                "0-0-0".to_owned()
            };
        }

        let end = square_to_algebraic(self.end);
        let mut out = String::new();

        if self.piece_moved.kind == PieceKind::Pawn {
            if self.is_capture() {
                out.push(file_char(self.start));
                out.push('x');
            }
            out.push_str(&end);
            if self.is_promotion {
                out.push('Q');
            }
            if self.is_en_passant {
                out.push_str(" e.p.");
            }
            return out;
        }

        out.push(self.piece_moved.kind.letter());
        if self.is_capture() {
            out.push('x');
        }
        out.push_str(&end);
        out
    }
}

fn file_char(square: Square) -> char {
    char::from(b'a' + square.col as u8)
}

impl PartialEq for ChessMove {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for ChessMove {}

impl Hash for ChessMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}
