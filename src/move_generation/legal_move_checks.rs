//! Check and pin analysis from a king square.
//!
//! Scans the eight rays and the knight offsets around a king and reports
//! whether it is attacked, which allied pieces are pinned to it, and which
//! enemy pieces give check. The scan is a pure function of the board so the
//! king move generator can probe hypothetical king squares without touching
//! the position.

use crate::game_state::chess_types::*;
use crate::moves::rays::{KNIGHT_OFFSETS, QUEEN_DIRECTIONS};

/// A square together with the ray direction (pointing away from the king)
/// that links it to the king. Used for both pins and checks; knight checks
/// carry the knight offset as their direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinRay {
    pub square: Square,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckInspection {
    pub in_check: bool,
    pub pins: Vec<PinRay>,
    pub checks: Vec<PinRay>,
}

/// Analyse checks and pins against a `color` king standing on `king_square`.
///
/// The king's own current square is treated as empty, so this can be asked
/// about a square the king has not moved to yet.
pub fn inspect_king(board: &Board, color: Color, king_square: Square) -> CheckInspection {
    let mut inspection = CheckInspection::default();

    for direction in QUEEN_DIRECTIONS {
        let mut candidate_pin: Option<Square> = None;

        for distance in 1..8 {
            let Some(target) = king_square.offset(direction, distance) else {
                break;
            };
            let Some(piece) = piece_on(board, target) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if candidate_pin.is_some() {
                    // Second allied piece: nothing on this ray can reach the king.
                    break;
                }
                candidate_pin = Some(target);
                continue;
            }

            if attacks_along_ray(piece, direction, distance) {
                match candidate_pin {
                    None => {
                        inspection.in_check = true;
                        inspection.checks.push(PinRay {
                            square: target,
                            direction,
                        });
                    }
                    Some(pinned) => inspection.pins.push(PinRay {
                        square: pinned,
                        direction,
                    }),
                }
            }
            break;
        }
    }

    for offset in KNIGHT_OFFSETS {
        let Some(target) = king_square.step(offset) else {
            continue;
        };
        if piece_on(board, target).is_some_and(|p| p.is(color.opposite(), PieceKind::Knight)) {
            inspection.in_check = true;
            inspection.checks.push(PinRay {
                square: target,
                direction: offset,
            });
        }
    }

    inspection
}

/// True when any `attacker` piece attacks `square`.
///
/// Pawns count only for their diagonal captures, not their pushes.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    for direction in QUEEN_DIRECTIONS {
        for distance in 1..8 {
            let Some(target) = square.offset(direction, distance) else {
                break;
            };
            if let Some(piece) = piece_on(board, target) {
                if piece.color == attacker && attacks_along_ray(piece, direction, distance) {
                    return true;
                }
                break;
            }
        }
    }

    KNIGHT_OFFSETS.iter().any(|&offset| {
        square
            .step(offset)
            .and_then(|target| piece_on(board, target))
            .is_some_and(|p| p.is(attacker, PieceKind::Knight))
    })
}

/// Whether `attacker`, found `distance` steps from a target along `direction`
/// (pointing from the target to the attacker), attacks the target.
#[inline]
fn attacks_along_ray(attacker: Piece, direction: Direction, distance: i8) -> bool {
    match attacker.kind {
        PieceKind::Rook => direction.is_orthogonal(),
        PieceKind::Bishop => direction.is_diagonal(),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        PieceKind::Pawn => {
            distance == 1
                && direction.is_diagonal()
                && direction.d_row == -attacker.color.pawn_forward()
        }
        PieceKind::Knight => false,
    }
}

#[inline]
fn piece_on(board: &Board, square: Square) -> Option<Piece> {
    board[square.row as usize][square.col as usize]
}
