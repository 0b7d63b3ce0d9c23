//! Static board evaluation.
//!
//! Scores are positive when light is better and do not depend on whose turn
//! it is; the search applies the turn sign. Terminal positions are read from
//! the flags set by the last legal move query.

use crate::game_state::{chess_types::*, game_state::GameState};

pub type Score = f32;

pub const CHECKMATE_SCORE: Score = 1000.0;
pub const STALEMATE_SCORE: Score = 0.0;

pub trait BoardScorer: Send + Sync {
    /// Score from light's point of view.
    fn score(&self, game_state: &GameState) -> Score;
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::King => 0.0,
        PieceKind::Queen => 9.0,
        PieceKind::Rook => 5.0,
        PieceKind::Bishop => 3.0,
        PieceKind::Knight => 3.0,
        PieceKind::Pawn => 1.0,
    }
}

type PositionTable = [[Score; 8]; 8];

// Tables are written from light's side: row 0 is the far (eighth) rank.
const KNIGHT_TABLE: PositionTable = [
    [0.0, 0.1, 0.2, 0.2, 0.2, 0.2, 0.1, 0.0],
    [0.1, 0.3, 0.5, 0.5, 0.5, 0.5, 0.3, 0.1],
    [0.2, 0.5, 0.6, 0.65, 0.65, 0.6, 0.5, 0.2],
    [0.2, 0.55, 0.65, 0.7, 0.7, 0.65, 0.55, 0.2],
    [0.2, 0.5, 0.65, 0.7, 0.7, 0.65, 0.5, 0.2],
    [0.2, 0.55, 0.6, 0.65, 0.65, 0.6, 0.55, 0.2],
    [0.1, 0.3, 0.5, 0.55, 0.55, 0.5, 0.3, 0.1],
    [0.0, 0.1, 0.2, 0.2, 0.2, 0.2, 0.1, 0.0],
];

const BISHOP_TABLE: PositionTable = [
    [0.0, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.0],
    [0.2, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.2],
    [0.2, 0.4, 0.5, 0.6, 0.6, 0.5, 0.4, 0.2],
    [0.2, 0.5, 0.5, 0.6, 0.6, 0.5, 0.5, 0.2],
    [0.2, 0.4, 0.6, 0.6, 0.6, 0.6, 0.4, 0.2],
    [0.2, 0.6, 0.6, 0.6, 0.6, 0.6, 0.6, 0.2],
    [0.2, 0.5, 0.4, 0.4, 0.4, 0.4, 0.5, 0.2],
    [0.0, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.0],
];

const ROOK_TABLE: PositionTable = [
    [0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25],
    [0.5, 0.75, 0.75, 0.75, 0.75, 0.75, 0.75, 0.5],
    [0.0, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.0],
    [0.0, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.0],
    [0.0, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.0],
    [0.0, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.0],
    [0.0, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.0],
    [0.25, 0.25, 0.25, 0.5, 0.5, 0.25, 0.25, 0.25],
];

const QUEEN_TABLE: PositionTable = [
    [0.0, 0.2, 0.2, 0.3, 0.3, 0.2, 0.2, 0.0],
    [0.2, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.2],
    [0.2, 0.4, 0.5, 0.5, 0.5, 0.5, 0.4, 0.2],
    [0.3, 0.4, 0.5, 0.5, 0.5, 0.5, 0.4, 0.3],
    [0.4, 0.4, 0.5, 0.5, 0.5, 0.5, 0.4, 0.3],
    [0.2, 0.5, 0.5, 0.5, 0.5, 0.5, 0.4, 0.2],
    [0.2, 0.4, 0.5, 0.4, 0.4, 0.4, 0.4, 0.2],
    [0.0, 0.2, 0.2, 0.3, 0.3, 0.2, 0.2, 0.0],
];

const PAWN_TABLE: PositionTable = [
    [0.8, 0.8, 0.8, 0.8, 0.8, 0.8, 0.8, 0.8],
    [0.7, 0.7, 0.7, 0.7, 0.7, 0.7, 0.7, 0.7],
    [0.3, 0.3, 0.4, 0.5, 0.5, 0.4, 0.3, 0.3],
    [0.25, 0.25, 0.3, 0.45, 0.45, 0.3, 0.25, 0.25],
    [0.2, 0.2, 0.2, 0.4, 0.4, 0.2, 0.2, 0.2],
    [0.25, 0.15, 0.1, 0.2, 0.2, 0.1, 0.15, 0.25],
    [0.25, 0.3, 0.3, 0.0, 0.0, 0.3, 0.3, 0.25],
    [0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2],
];

/// Positional bonus for `piece` on `square`. Dark reads the light table
/// mirrored top to bottom. Kings get no bonus.
#[inline]
pub fn position_bonus(piece: Piece, square: Square) -> Score {
    let table = match piece.kind {
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::King => return 0.0,
    };
    let row = match piece.color {
        Color::Light => square.row,
        Color::Dark => 7 - square.row,
    };
    table[row as usize][square.col as usize]
}

/// Material plus position tables, with checkmate and stalemate overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTableScorer;

impl BoardScorer for PositionTableScorer {
    fn score(&self, game_state: &GameState) -> Score {
        if game_state.checkmate {
            // The side to move has been mated.
            return -game_state.side_to_move.sign() * CHECKMATE_SCORE;
        }
        if game_state.stalemate {
            return STALEMATE_SCORE;
        }

        game_state
            .occupied_squares()
            .map(|(square, piece)| {
                piece.color.sign() * (piece_value(piece.kind) + position_bonus(piece, square))
            })
            .sum()
    }
}

/// Evaluates with the default scorer.
#[inline]
pub fn score_board(game_state: &GameState) -> Score {
    PositionTableScorer.score(game_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;

    fn scored(fen: &str) -> Score {
        let mut game = GameState::from_fen(fen).expect("test FEN should parse");
        generate_legal_moves(&mut game);
        score_board(&game)
    }

    /// Flip the board top to bottom and swap piece colors.
    fn mirrored(game: &GameState) -> GameState {
        let mut board: Board = [[None; 8]; 8];
        for (square, piece) in game.occupied_squares() {
            board[7 - square.row as usize][square.col as usize] =
                Some(Piece::new(piece.color.opposite(), piece.kind));
        }
        GameState::from_parts(
            board,
            game.side_to_move.opposite(),
            CastlingRights::NONE,
            None,
        )
        .expect("mirrored position keeps both kings")
    }

    #[test]
    fn starting_position_is_balanced() {
        assert!(score_board(&GameState::new_game()).abs() < 1e-4);
    }

    #[test]
    fn mirrored_positions_score_as_negations() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
        ] {
            let game = GameState::from_fen(fen).expect("test FEN should parse");
            let light = game.side_to_move.sign() * score_board(&game);
            let mirror = mirrored(&game);
            let dark = mirror.side_to_move.sign() * score_board(&mirror);
            assert!((light - dark).abs() < 1e-3, "{fen}: {light} vs {dark}");
        }
    }

    #[test]
    fn material_and_tables_add_up() {
        // Lone light knight on d4 versus bare king.
        let score = scored("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1");
        assert!((score - 3.7).abs() < 1e-4);
        let score = scored("4k3/8/8/8/3n4/8/8/4K3 w - - 0 1");
        assert!((score + 3.7).abs() < 1e-4);
    }

    #[test]
    fn checkmate_scores_are_exact() {
        // Dark is mated on the back rank.
        assert_eq!(scored("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"), CHECKMATE_SCORE);
        // Light is mated.
        assert_eq!(scored("6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1"), -CHECKMATE_SCORE);
    }

    #[test]
    fn stalemate_scores_zero() {
        assert_eq!(scored("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), STALEMATE_SCORE);
    }
}
