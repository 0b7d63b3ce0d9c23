use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_slides, PinMap};
use crate::moves::move_descriptions::ChessMove;
use crate::moves::rays::BISHOP_DIRECTIONS;

pub fn generate_bishop_moves(
    game_state: &GameState,
    from: Square,
    pins: &PinMap,
    out: &mut Vec<ChessMove>,
) {
    let bishop = Piece::new(game_state.side_to_move, PieceKind::Bishop);
    generate_diagonal_slides(game_state, from, bishop, pins, out);
}

/// Diagonal slides for `piece`, restricted to the pin axis when pinned.
pub(crate) fn generate_diagonal_slides(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    pins: &PinMap,
    out: &mut Vec<ChessMove>,
) {
    for direction in BISHOP_DIRECTIONS {
        if pins.allows(from, direction) {
            push_slides(game_state, from, piece, direction, out);
        }
    }
}
