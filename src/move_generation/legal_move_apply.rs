//! In-place execute/undo on a `GameState`.
//!
//! Both operations trust their input: callers only execute moves taken from
//! the current legal move set and only undo what they executed.

use crate::game_state::chess_rules::{
    KINGSIDE_ROOK_FROM_COL, KINGSIDE_ROOK_TO_COL, QUEENSIDE_ROOK_FROM_COL, QUEENSIDE_ROOK_TO_COL,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::ChessMove;

pub fn execute_move(game_state: &mut GameState, mv: &ChessMove) {
    let mover = mv.piece_moved.color;

    game_state.set_piece(mv.start, None);
    let placed = if mv.is_promotion {
        Piece::new(mover, PieceKind::Queen)
    } else {
        mv.piece_moved
    };
    game_state.set_piece(mv.end, Some(placed));

    if mv.piece_moved.kind == PieceKind::King {
        game_state.set_king_square(mover, mv.end);
    }

    if mv.is_en_passant {
        game_state.set_piece(mv.capture_square(), None);
    }

    if mv.is_castle {
        let (rook_from, rook_to) = castle_rook_columns(mv);
        let rook = game_state.piece_at(Square::new(mv.end.row, rook_from));
        game_state.set_piece(Square::new(mv.end.row, rook_from), None);
        game_state.set_piece(Square::new(mv.end.row, rook_to), rook);
    }

    let en_passant_target = (mv.piece_moved.kind == PieceKind::Pawn
        && (mv.start.row - mv.end.row).abs() == 2)
        .then(|| Square::new((mv.start.row + mv.end.row) / 2, mv.start.col));
    game_state.en_passant_log.push(en_passant_target);

    let mut rights = game_state.castling_rights();
    update_castling_rights(&mut rights, mv);
    game_state.castling_log.push(rights);

    game_state.move_log.push(*mv);
    game_state.side_to_move = game_state.side_to_move.opposite();

    debug_assert!(
        game_state.king_cache_is_consistent(),
        "king cache diverged from board after {mv}"
    );
}

/// Reverts the most recent move. Does nothing when no move has been made.
pub fn undo_move(game_state: &mut GameState) -> Option<ChessMove> {
    let mv = game_state.move_log.pop()?;
    let mover = mv.piece_moved.color;

    game_state.set_piece(mv.start, Some(mv.piece_moved));
    if mv.is_en_passant {
        game_state.set_piece(mv.end, None);
        game_state.set_piece(mv.capture_square(), mv.piece_captured);
    } else {
        game_state.set_piece(mv.end, mv.piece_captured);
    }

    if mv.piece_moved.kind == PieceKind::King {
        game_state.set_king_square(mover, mv.start);
    }

    if mv.is_castle {
        let (rook_from, rook_to) = castle_rook_columns(&mv);
        let rook = game_state.piece_at(Square::new(mv.end.row, rook_to));
        game_state.set_piece(Square::new(mv.end.row, rook_to), None);
        game_state.set_piece(Square::new(mv.end.row, rook_from), rook);
    }

    game_state.en_passant_log.pop();
    game_state.castling_log.pop();

    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.checkmate = false;
    game_state.stalemate = false;

    debug_assert!(
        game_state.king_cache_is_consistent(),
        "king cache diverged from board after undoing {mv}"
    );
    Some(mv)
}

fn castle_rook_columns(mv: &ChessMove) -> (i8, i8) {
    if mv.is_kingside_castle() {
        (KINGSIDE_ROOK_FROM_COL, KINGSIDE_ROOK_TO_COL)
    } else {
        (QUEENSIDE_ROOK_FROM_COL, QUEENSIDE_ROOK_TO_COL)
    }
}

/// Rights only ever shrink here; undo restores them from the log.
fn update_castling_rights(rights: &mut CastlingRights, mv: &ChessMove) {
    let mover = mv.piece_moved.color;
    match mv.piece_moved.kind {
        PieceKind::King => rights.revoke_all(mover),
        PieceKind::Rook => revoke_for_corner(rights, mover, mv.start),
        _ => {}
    }

    if let Some(captured) = mv.piece_captured {
        if captured.kind == PieceKind::Rook {
            revoke_for_corner(rights, captured.color, mv.end);
        }
    }
}

fn revoke_for_corner(rights: &mut CastlingRights, color: Color, square: Square) {
    if square.row != color.home_row() {
        return;
    }
    match square.col {
        QUEENSIDE_ROOK_FROM_COL => rights.revoke_queenside(color),
        KINGSIDE_ROOK_FROM_COL => rights.revoke_kingside(color),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn find(game: &mut GameState, from: &str, to: &str) -> ChessMove {
        let (from, to) = (sq(from), sq(to));
        generate_legal_moves(game)
            .into_iter()
            .find(|m| m.start == from && m.end == to)
            .expect("move should be legal")
    }

    fn snapshot(game: &GameState) -> (Board, Color, Square, Square, Option<Square>, CastlingRights) {
        (
            game.board,
            game.side_to_move,
            game.light_king,
            game.dark_king,
            game.en_passant_target(),
            game.castling_rights(),
        )
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut game = GameState::new_game();
        let before = snapshot(&game);
        assert!(undo_move(&mut game).is_none());
        assert_eq!(snapshot(&game), before);
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut game = GameState::new_game();
        let mv = find(&mut game, "e2", "e4");
        execute_move(&mut game, &mv);
        assert_eq!(game.en_passant_target(), Some(sq("e3")));
        assert_eq!(game.side_to_move, Color::Dark);

        let reply = find(&mut game, "g8", "f6");
        execute_move(&mut game, &reply);
        assert_eq!(game.en_passant_target(), None);
    }

    #[test]
    fn en_passant_round_trip_restores_captured_pawn() {
        let mut game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let before = snapshot(&game);
        let mv = find(&mut game, "e5", "d6");
        assert!(mv.is_en_passant);

        execute_move(&mut game, &mv);
        assert!(game.is_empty(sq("d5")));
        assert_eq!(
            game.piece_at(sq("d6")),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );

        undo_move(&mut game);
        assert_eq!(snapshot(&game), before);
        assert!(game.is_empty(sq("d6")));
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let before = snapshot(&game);

        let mv = find(&mut game, "e1", "g1");
        execute_move(&mut game, &mv);
        assert_eq!(
            game.piece_at(sq("f1")),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert!(game.is_empty(sq("h1")));
        assert_eq!(game.light_king, sq("g1"));
        let rights = game.castling_rights();
        assert!(!rights.light_kingside && !rights.light_queenside);
        assert!(rights.dark_kingside && rights.dark_queenside);

        let mv = find(&mut game, "e8", "c8");
        execute_move(&mut game, &mv);
        assert_eq!(
            game.piece_at(sq("d8")),
            Some(Piece::new(Color::Dark, PieceKind::Rook))
        );
        assert!(game.is_empty(sq("a8")));

        undo_move(&mut game);
        undo_move(&mut game);
        assert_eq!(snapshot(&game), before);
    }

    #[test]
    fn rook_moves_and_captures_revoke_one_wing() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = find(&mut game, "a1", "a8");
        execute_move(&mut game, &mv);
        assert_eq!(
            game.castling_rights(),
            CastlingRights {
                light_kingside: true,
                dark_kingside: true,
                light_queenside: false,
                dark_queenside: false,
            }
        );
    }

    #[test]
    fn promotion_places_a_queen_and_undo_restores_the_pawn() {
        let mut game =
            GameState::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let before = snapshot(&game);
        let mv = find(&mut game, "a7", "b8");
        assert!(mv.is_promotion && mv.is_capture());

        execute_move(&mut game, &mv);
        assert_eq!(
            game.piece_at(sq("b8")),
            Some(Piece::new(Color::Light, PieceKind::Queen))
        );

        undo_move(&mut game);
        assert_eq!(snapshot(&game), before);
    }

    #[test]
    fn every_move_two_plies_deep_is_reversible() {
        let mut game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let root = snapshot(&game);

        for mv in generate_legal_moves(&mut game) {
            execute_move(&mut game, &mv);
            let after_first = snapshot(&game);
            for reply in generate_legal_moves(&mut game) {
                execute_move(&mut game, &reply);
                undo_move(&mut game);
                assert_eq!(snapshot(&game), after_first, "undo of {reply} after {mv}");
            }
            undo_move(&mut game);
            assert_eq!(snapshot(&game), root, "undo of {mv}");
        }
    }
}
