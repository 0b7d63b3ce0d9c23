use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::PinMap;
use crate::move_generation::legal_moves_bishop::generate_diagonal_slides;
use crate::move_generation::legal_moves_rook::generate_orthogonal_slides;
use crate::moves::move_descriptions::ChessMove;

/// Rook slides then bishop slides; one pin entry restricts both.
pub fn generate_queen_moves(
    game_state: &GameState,
    from: Square,
    pins: &PinMap,
    out: &mut Vec<ChessMove>,
) {
    let queen = Piece::new(game_state.side_to_move, PieceKind::Queen);
    generate_orthogonal_slides(game_state, from, queen, pins, out);
    generate_diagonal_slides(game_state, from, queen, pins, out);
}
