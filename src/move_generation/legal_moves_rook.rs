use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_slides, PinMap};
use crate::moves::move_descriptions::ChessMove;
use crate::moves::rays::ROOK_DIRECTIONS;

pub fn generate_rook_moves(
    game_state: &GameState,
    from: Square,
    pins: &PinMap,
    out: &mut Vec<ChessMove>,
) {
    let rook = Piece::new(game_state.side_to_move, PieceKind::Rook);
    generate_orthogonal_slides(game_state, from, rook, pins, out);
}

/// Orthogonal slides for `piece`, restricted to the pin axis when pinned.
pub(crate) fn generate_orthogonal_slides(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    pins: &PinMap,
    out: &mut Vec<ChessMove>,
) {
    for direction in ROOK_DIRECTIONS {
        if pins.allows(from, direction) {
            push_slides(game_state, from, piece, direction, out);
        }
    }
}
