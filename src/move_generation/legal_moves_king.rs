//! King steps and castling.

use crate::game_state::chess_rules::{
    KINGSIDE_ROOK_FROM_COL, KING_START_COL, QUEENSIDE_ROOK_FROM_COL,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{inspect_king, is_square_attacked};
use crate::moves::move_descriptions::ChessMove;
use crate::moves::rays::KING_OFFSETS;

/// King steps that do not land in check.
///
/// Each destination is probed by re-running the king scan from that square
/// with the king's current square treated as vacated; the position itself is
/// never touched, so there is nothing to restore afterwards.
pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<ChessMove>) {
    let color = game_state.side_to_move;
    let king = Piece::new(color, PieceKind::King);

    for offset in KING_OFFSETS {
        let Some(to) = from.step(offset) else {
            continue;
        };
        if game_state
            .piece_at(to)
            .is_some_and(|other| other.color == color)
        {
            continue;
        }
        if !inspect_king(&game_state.board, color, to).in_check {
            out.push(ChessMove::new(from, to, king, &game_state.board));
        }
    }
}

/// Castling moves for the side to move. The caller only asks when the side to
/// move is not in check; the king square is re-tested here regardless.
pub fn generate_castle_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let color = game_state.side_to_move;
    let enemy = color.opposite();
    let from = game_state.king_square(color);
    let rights = game_state.castling_rights();

    if from != Square::new(color.home_row(), KING_START_COL) {
        return;
    }
    if is_square_attacked(&game_state.board, from, enemy) {
        return;
    }

    let king = Piece::new(color, PieceKind::King);
    let row = from.row;

    if rights.kingside(color)
        && has_own_rook(game_state, color, Square::new(row, KINGSIDE_ROOK_FROM_COL))
        && path_is_clear(game_state, row, &[5, 6])
        && path_is_safe(game_state, enemy, row, &[5, 6])
    {
        out.push(ChessMove::castle(from, Square::new(row, 6), king));
    }

    if rights.queenside(color)
        && has_own_rook(game_state, color, Square::new(row, QUEENSIDE_ROOK_FROM_COL))
        && path_is_clear(game_state, row, &[3, 2, 1])
        && path_is_safe(game_state, enemy, row, &[3, 2])
    {
        out.push(ChessMove::castle(from, Square::new(row, 2), king));
    }
}

fn has_own_rook(game_state: &GameState, color: Color, square: Square) -> bool {
    game_state
        .piece_at(square)
        .is_some_and(|piece| piece.is(color, PieceKind::Rook))
}

fn path_is_clear(game_state: &GameState, row: i8, cols: &[i8]) -> bool {
    cols.iter()
        .all(|&col| game_state.is_empty(Square::new(row, col)))
}

fn path_is_safe(game_state: &GameState, enemy: Color, row: i8, cols: &[i8]) -> bool {
    cols.iter()
        .all(|&col| !is_square_attacked(&game_state.board, Square::new(row, col), enemy))
}
