//! Long algebraic ("e2e4", "e7e8q") conversion against the legal move set.

use crate::errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &ChessMove) -> String {
    let mut out = square_to_algebraic(mv.start);
    out.push_str(&square_to_algebraic(mv.end));
    if mv.is_promotion {
        out.push('q');
    }
    out
}

/// Resolve `long_algebraic` to one of the legal moves in `game_state`.
///
/// Promotions always produce a queen, so the suffix may be omitted; if given
/// it must be `q`.
pub fn long_algebraic_to_move(
    long_algebraic: &str,
    game_state: &mut GameState,
) -> Result<ChessMove, ChessError> {
    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(ChessError::InvalidAlgebraic(long_algebraic.to_owned()));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;
    let promotion_suffix = long_algebraic[4..].chars().next();
    if promotion_suffix.is_some_and(|c| !c.eq_ignore_ascii_case(&'q')) {
        return Err(ChessError::InvalidAlgebraic(long_algebraic.to_owned()));
    }

    let mv = generate_legal_moves(game_state)
        .into_iter()
        .find(|mv| mv.start == from && mv.end == to)
        .ok_or_else(|| ChessError::IllegalMove(long_algebraic.to_owned()))?;

    if promotion_suffix.is_some() && !mv.is_promotion {
        return Err(ChessError::IllegalMove(long_algebraic.to_owned()));
    }
    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::execute_move;

    #[test]
    fn resolves_ordinary_and_special_moves() {
        let mut game = GameState::new_game();
        let mv = long_algebraic_to_move("e2e4", &mut game).expect("e2e4 is legal");
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");
        execute_move(&mut game, &mv);

        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = long_algebraic_to_move("e1c1", &mut game).expect("castling is legal");
        assert!(castle.is_castle);

        let mut game =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promo = long_algebraic_to_move("a7a8q", &mut game).expect("promotion is legal");
        assert!(promo.is_promotion);
        assert_eq!(move_to_long_algebraic(&promo), "a7a8q");
        assert!(long_algebraic_to_move("a7a8", &mut game).is_ok());
    }

    #[test]
    fn rejects_bad_text_and_illegal_moves() {
        let mut game = GameState::new_game();
        assert!(matches!(
            long_algebraic_to_move("e2", &mut game),
            Err(ChessError::InvalidAlgebraic(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("z2e4", &mut game),
            Err(ChessError::InvalidAlgebraic(_))
        ));
        assert_eq!(
            long_algebraic_to_move("e2e5", &mut game),
            Err(ChessError::IllegalMove("e2e5".to_owned()))
        );
        assert_eq!(
            long_algebraic_to_move("e2e4q", &mut game),
            Err(ChessError::IllegalMove("e2e4q".to_owned()))
        );
        assert!(matches!(
            long_algebraic_to_move("e7e8n", &mut game),
            Err(ChessError::InvalidAlgebraic(_))
        ));
    }
}
