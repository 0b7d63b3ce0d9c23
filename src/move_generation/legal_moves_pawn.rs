//! Pawn advances, captures, promotions and en passant.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::PinMap;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::rays::pawn_capture_directions;

pub fn generate_pawn_moves(
    game_state: &GameState,
    from: Square,
    pins: &PinMap,
    out: &mut Vec<ChessMove>,
) {
    let color = game_state.side_to_move;
    let pawn = Piece::new(color, PieceKind::Pawn);
    let forward = Direction::new(color.pawn_forward(), 0);

    if pins.allows(from, forward) {
        if let Some(one) = from.step(forward).filter(|&sq| game_state.is_empty(sq)) {
            out.push(ChessMove::new(from, one, pawn, &game_state.board));

            if from.row == color.pawn_row() {
                if let Some(two) = one.step(forward).filter(|&sq| game_state.is_empty(sq)) {
                    out.push(ChessMove::new(from, two, pawn, &game_state.board));
                }
            }
        }
    }

    let en_passant_target = game_state.en_passant_target();
    for direction in pawn_capture_directions(color) {
        if !pins.allows(from, direction) {
            continue;
        }
        let Some(to) = from.step(direction) else {
            continue;
        };

        if game_state
            .piece_at(to)
            .is_some_and(|target| target.color != color)
        {
            out.push(ChessMove::new(from, to, pawn, &game_state.board));
        } else if en_passant_target == Some(to)
            && en_passant_keeps_king_safe(game_state, from, to, pawn)
        {
            out.push(ChessMove::en_passant(from, to, pawn));
        }
    }
}

/// En passant removes two pawns from one rank at once, which can uncover a
/// rook or queen on that rank (or a bishop through the captured pawn's square)
/// that no pin scan saw. Replay the capture on a scratch board and ask whether
/// the king is attacked afterwards.
fn en_passant_keeps_king_safe(game_state: &GameState, from: Square, to: Square, pawn: Piece) -> bool {
    let mut board = game_state.board;
    board[from.row as usize][from.col as usize] = None;
    board[from.row as usize][to.col as usize] = None;
    board[to.row as usize][to.col as usize] = Some(pawn);

    let king = game_state.king_square(pawn.color);
    !is_square_attacked(&board, king, pawn.color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::inspect_king;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn pawn_moves(fen: &str, from: &str) -> Vec<ChessMove> {
        let game = GameState::from_fen(fen).expect("test FEN should parse");
        let color = game.side_to_move;
        let inspection = inspect_king(&game.board, color, game.king_square(color));
        let pins = PinMap::from_rays(&inspection.pins);
        let mut out = Vec::new();
        generate_pawn_moves(&game, sq(from), &pins, &mut out);
        out
    }

    #[test]
    fn home_rank_pawn_has_single_and_double_advance() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2");
        let ends: Vec<Square> = moves.iter().map(|m| m.end).collect();
        assert_eq!(ends, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());
        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2");
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn captures_and_promotion_flags() {
        let moves = pawn_moves("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.is_promotion));
        assert!(moves.iter().any(|m| m.end == sq("b8") && m.is_capture()));
    }

    #[test]
    fn pinned_pawn_may_advance_along_file_pin_only() {
        let moves = pawn_moves("4r1k1/8/8/8/8/3b1b2/4P3/4K3 w - - 0 1", "e2");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.end.col == 4));
    }

    #[test]
    fn diagonally_pinned_pawn_may_capture_the_pinner() {
        let moves = pawn_moves("4k3/8/8/8/8/5b2/4P3/3K4 w - - 0 1", "e2");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].end, sq("f3"));
        assert!(moves[0].is_capture());
    }

    #[test]
    fn en_passant_is_generated_for_the_logged_target() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5");
        let ep: Vec<&ChessMove> = moves.iter().filter(|m| m.is_en_passant).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].end, sq("d6"));
        assert_eq!(ep[0].capture_square(), sq("d5"));
    }

    #[test]
    fn en_passant_that_opens_the_rank_is_rejected() {
        let moves = pawn_moves("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1", "e5");
        assert!(moves.iter().all(|m| !m.is_en_passant));
        assert_eq!(moves.len(), 1);

        // A blocker between the pawns and the rook keeps the capture legal.
        let moves = pawn_moves("8/8/8/K2pPn1r/8/8/8/4k3 w - d6 0 1", "e5");
        assert!(moves.iter().any(|m| m.is_en_passant));
    }
}
