//! Errors raised at the fallible edges of the crate.
//!
//! The rules core (execute, undo, legal move queries, search) trusts its input
//! and does not return errors. Parsing, option handling and record reading do,
//! and they all report through [`ChessError`].

use thiserror::Error;

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A FEN string could not be interpreted.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square or long algebraic move string could not be interpreted.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    /// The board has no king for one side.
    #[error("position has no {0:?} king")]
    MissingKing(Color),

    /// The board has more than one king for one side.
    #[error("position has more than one {0:?} king")]
    DuplicateKing(Color),

    /// A game record's headers or layout could not be interpreted.
    #[error("invalid game record: {0}")]
    InvalidPgn(String),

    /// A move string named a move that is not legal in the position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// An engine was given an option name it does not recognise.
    #[error("unknown engine option: {0}")]
    UnknownOption(String),

    /// An engine option value was out of range or malformed.
    #[error("invalid value '{value}' for option {name}")]
    InvalidOptionValue { name: String, value: String },
}
