//! Canonical chess-rule constants.
//!
//! Starting position, castling geometry and the fixed search-facing scores
//! shared by the position model, the generators and the evaluator.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Column the king starts on.
pub const KING_START_COL: i8 = 4;

/// Column of the kingside rook before and after castling.
pub const KINGSIDE_ROOK_FROM_COL: i8 = 7;
pub const KINGSIDE_ROOK_TO_COL: i8 = 5;

/// Column of the queenside rook before and after castling.
pub const QUEENSIDE_ROOK_FROM_COL: i8 = 0;
pub const QUEENSIDE_ROOK_TO_COL: i8 = 3;
