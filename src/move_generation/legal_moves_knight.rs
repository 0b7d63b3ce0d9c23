use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_step, PinMap};
use crate::moves::move_descriptions::ChessMove;
use crate::moves::rays::KNIGHT_OFFSETS;

/// A pinned knight has no move that stays on its pin axis, so it never moves.
pub fn generate_knight_moves(
    game_state: &GameState,
    from: Square,
    pins: &PinMap,
    out: &mut Vec<ChessMove>,
) {
    if pins.is_pinned(from) {
        return;
    }
    let knight = Piece::new(game_state.side_to_move, PieceKind::Knight);
    for offset in KNIGHT_OFFSETS {
        push_step(game_state, from, knight, offset, out);
    }
}
