//! Full legal move generation pipeline.
//!
//! Runs the king scan once, turns its pins into a read-only `PinMap`, asks
//! the per-piece generators for their moves in row-major board order, then
//! narrows the result when the side to move is in check. The check and
//! terminal flags on `GameState` are rewritten on every call.

use log::trace;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{inspect_king, PinRay};
use crate::move_generation::legal_move_shared::PinMap;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castle_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::move_descriptions::ChessMove;

/// Legal moves for the side to move.
///
/// In single check a move must land on the checking ray or the checker, with
/// one exception: an en passant capture that removes a checking pawn.
///
/// Also refreshes `in_check`, `pins`, `checks`, `checkmate` and `stalemate`.
pub fn generate_legal_moves(game_state: &mut GameState) -> Vec<ChessMove> {
    let color = game_state.side_to_move;
    let king_square = game_state.king_square(color);
    let inspection = inspect_king(&game_state.board, color, king_square);

    let mut moves = Vec::with_capacity(64);

    match inspection.checks.as_slice() {
        [] => {
            let pins = PinMap::from_rays(&inspection.pins);
            generate_pseudo_moves(game_state, &pins, &mut moves);
            generate_castle_moves(game_state, &mut moves);
        }
        [check] => {
            let pins = PinMap::from_rays(&inspection.pins);
            generate_pseudo_moves(game_state, &pins, &mut moves);
            let blocking = blocking_squares(game_state, king_square, check);
            let checker = check.square;
            moves.retain(|mv| {
                mv.piece_moved.kind == PieceKind::King
                    || blocking.contains(&mv.end)
                    || (mv.is_en_passant && mv.capture_square() == checker)
            });
        }
        _ => generate_king_moves(game_state, king_square, &mut moves),
    }

    game_state.in_check = inspection.in_check;
    game_state.pins = inspection.pins;
    game_state.checks = inspection.checks;

    if moves.is_empty() {
        game_state.checkmate = game_state.in_check;
        game_state.stalemate = !game_state.in_check;
    } else {
        game_state.checkmate = false;
        game_state.stalemate = false;
    }

    trace!(
        "{:?} to move: {} legal moves, in_check={}, checks={}",
        color,
        moves.len(),
        game_state.in_check,
        game_state.checks.len()
    );

    moves
}

/// Every piece's moves under the pin restrictions, visiting squares row-major.
/// Castling is generated separately.
pub fn generate_pseudo_moves(game_state: &GameState, pins: &PinMap, out: &mut Vec<ChessMove>) {
    let color = game_state.side_to_move;
    for (from, piece) in game_state.occupied_squares() {
        if piece.color != color {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(game_state, from, pins, out),
            PieceKind::Knight => generate_knight_moves(game_state, from, pins, out),
            PieceKind::Bishop => generate_bishop_moves(game_state, from, pins, out),
            PieceKind::Rook => generate_rook_moves(game_state, from, pins, out),
            PieceKind::Queen => generate_queen_moves(game_state, from, pins, out),
            PieceKind::King => generate_king_moves(game_state, from, out),
        }
    }
}

/// Squares a non-king move may land on to answer a single check: the checker
/// itself, plus every square between it and the king for sliding checkers.
fn blocking_squares(game_state: &GameState, king_square: Square, check: &PinRay) -> Vec<Square> {
    let checker_is_knight = game_state
        .piece_at(check.square)
        .is_some_and(|piece| piece.kind == PieceKind::Knight);
    if checker_is_knight {
        return vec![check.square];
    }

    let mut squares = Vec::with_capacity(7);
    for distance in 1..8 {
        let Some(square) = king_square.offset(check.direction, distance) else {
            break;
        };
        squares.push(square);
        if square == check.square {
            break;
        }
    }
    squares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameStatus;
    use crate::move_generation::legal_move_apply::{execute_move, undo_move};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn legal(fen: &str) -> (GameState, Vec<ChessMove>) {
        let mut game = GameState::from_fen(fen).expect("test FEN should parse");
        let moves = generate_legal_moves(&mut game);
        (game, moves)
    }

    #[test]
    fn starting_position_has_twenty_moves_and_four_hundred_replies() {
        let mut game = GameState::new_game();
        let moves = generate_legal_moves(&mut game);
        assert_eq!(moves.len(), 20);

        let mut replies = 0;
        for mv in &moves {
            execute_move(&mut game, mv);
            replies += generate_legal_moves(&mut game).len();
            undo_move(&mut game);
        }
        assert_eq!(replies, 400);
    }

    #[test]
    fn pinned_knight_has_no_moves() {
        let (_, moves) = legal("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.start != sq("e2")));
    }

    #[test]
    fn pinned_rook_moves_only_along_the_pin() {
        let (game, moves) = legal("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let rook: Vec<Square> = moves
            .iter()
            .filter(|m| m.start == sq("e2"))
            .map(|m| m.end)
            .collect();
        assert_eq!(rook.len(), 6);
        assert!(rook.iter().all(|s| s.col == 4));
        assert!(rook.contains(&sq("e8")));
        assert_eq!(game.pins.len(), 1);
    }

    #[test]
    fn single_check_by_slider_is_blocked_captured_or_evaded() {
        // Rook e8 checks the king on e1; the bishop on c2 can't reach the file
        // except on e4, the knight on g3 can interpose on e2 or e4.
        let (game, moves) = legal("4r1k1/8/8/8/8/6N1/2B5/4K3 w - - 0 1");
        assert!(game.in_check);
        let ray: Vec<Square> = ["e2", "e3", "e4", "e5", "e6", "e7", "e8"]
            .into_iter()
            .map(sq)
            .collect();
        for mv in moves.iter().filter(|m| m.piece_moved.kind != PieceKind::King) {
            assert!(ray.contains(&mv.end), "{mv} does not answer the check");
        }
        assert!(moves.iter().any(|m| m.start == sq("c2") && m.end == sq("e4")));
        assert!(moves.iter().any(|m| m.start == sq("g3") && m.end == sq("e2")));
        assert!(moves.iter().any(|m| m.start == sq("g3") && m.end == sq("e4")));
    }

    #[test]
    fn knight_check_must_capture_the_knight() {
        let (_, moves) = legal("4k3/8/8/8/8/R2n4/8/4K3 w - - 0 1");
        let non_king: Vec<&ChessMove> = moves
            .iter()
            .filter(|m| m.piece_moved.kind != PieceKind::King)
            .collect();
        assert_eq!(non_king.len(), 1);
        assert_eq!(non_king[0].start, sq("a3"));
        assert_eq!(non_king[0].end, sq("d3"));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let (game, moves) = legal("4k3/8/8/8/3Q4/5n2/8/r3K3 w - - 0 1");
        assert_eq!(game.checks.len(), 2);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.piece_moved.kind == PieceKind::King));
        let mut ends: Vec<Square> = moves.iter().map(|m| m.end).collect();
        ends.sort_by_key(|s| (s.row, s.col));
        assert_eq!(ends, vec![sq("e2"), sq("f2")]);
    }

    #[test]
    fn en_passant_may_remove_the_checking_pawn() {
        // d7-d5 gave check to the king on e4.
        let (game, moves) = legal("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
        assert!(game.in_check);
        assert!(moves
            .iter()
            .any(|m| m.is_en_passant && m.start == sq("e5") && m.end == sq("d6")));
    }

    #[test]
    fn castling_is_not_offered_while_in_check() {
        let (_, moves) = legal("r3k2r/8/8/8/8/8/8/R3K1r1 w KQkq - 0 1");
        assert!(moves.iter().all(|m| !m.is_castle));
    }

    #[test]
    fn detects_checkmate_and_stalemate() {
        let (game, moves) = legal("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(moves.is_empty());
        assert!(game.checkmate && !game.stalemate);
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Light
            }
        );

        let (game, moves) = legal("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(moves.is_empty());
        assert!(game.stalemate && !game.checkmate);
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn flags_clear_after_undo_and_regeneration() {
        let mut game =
            GameState::from_fen("7k/8/4Q1K1/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let moves = generate_legal_moves(&mut game);
        let stalemating = moves
            .iter()
            .find(|m| m.start == sq("e6") && m.end == sq("f7"))
            .copied()
            .expect("Qf7 should be legal");
        execute_move(&mut game, &stalemating);
        assert!(generate_legal_moves(&mut game).is_empty());
        assert!(game.stalemate);

        undo_move(&mut game);
        assert!(!game.stalemate);
        assert!(!generate_legal_moves(&mut game).is_empty());
    }
}
