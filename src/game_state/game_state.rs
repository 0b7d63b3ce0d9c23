//! Mutable position model.
//!
//! `GameState` owns the board, side to move, cached king squares and the
//! history stacks (moves, en passant targets, castling rights) that let
//! `execute_move`/`undo_move` run in place inside a search tree. The check,
//! pin and terminal flags are request-scoped: they are rewritten by every
//! legal move query and are not trusted across moves.

use crate::errors::ChessError;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::PinRay;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,

    // Cached king squares; must always agree with `board`.
    pub light_king: Square,
    pub dark_king: Square,

    // --- History stacks (append/pop at the end only) ---
    pub move_log: Vec<ChessMove>,
    /// Mirrors `move_log`; the top entry is the current en passant target.
    pub en_passant_log: Vec<Option<Square>>,
    /// Mirrors `move_log`; the top entry is the current castling rights.
    pub castling_log: Vec<CastlingRights>,

    // --- Derived facts from the last legal move query ---
    pub in_check: bool,
    pub pins: Vec<PinRay>,
    pub checks: Vec<PinRay>,
    pub checkmate: bool,
    pub stalemate: bool,
}

/// Comparable snapshot of board, side to move and castling rights.
///
/// Two positions with equal keys count as the same position for repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
}

/// Outcome visible after the most recent legal move query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameState {
    /// Builds a position from raw parts with empty history.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Result<Self, ChessError> {
        let light_king = locate_king(&board, Color::Light)?;
        let dark_king = locate_king(&board, Color::Dark)?;

        Ok(Self {
            board,
            side_to_move,
            light_king,
            dark_king,
            move_log: Vec::new(),
            en_passant_log: vec![en_passant_target],
            castling_log: vec![castling_rights],
            in_check: false,
            pins: Vec::new(),
            checks: Vec::new(),
            checkmate: false,
            stalemate: false,
        })
    }

    /// Standard starting position, light to move.
    pub fn new_game() -> Self {
        let mut board: Board = [[None; 8]; 8];
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, kind) in back_rank.into_iter().enumerate() {
            board[0][col] = Some(Piece::new(Color::Dark, kind));
            board[1][col] = Some(Piece::new(Color::Dark, PieceKind::Pawn));
            board[6][col] = Some(Piece::new(Color::Light, PieceKind::Pawn));
            board[7][col] = Some(Piece::new(Color::Light, kind));
        }

        Self {
            board,
            side_to_move: Color::Light,
            light_king: Square::new(7, 4),
            dark_king: Square::new(0, 4),
            move_log: Vec::new(),
            en_passant_log: vec![None],
            castling_log: vec![CastlingRights::ALL],
            in_check: false,
            pins: Vec::new(),
            checks: Vec::new(),
            checkmate: false,
            stalemate: false,
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::Light => self.light_king,
            Color::Dark => self.dark_king,
        }
    }

    #[inline]
    pub fn set_king_square(&mut self, color: Color, square: Square) {
        match color {
            Color::Light => self.light_king = square,
            Color::Dark => self.dark_king = square,
        }
    }

    /// Square passed over by the last two-square pawn advance, if any.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_log.last().copied().flatten()
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_log
            .last()
            .copied()
            .unwrap_or(CastlingRights::NONE)
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights(),
        }
    }

    /// Terminal status as of the last legal move query.
    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate {
                winner: self.side_to_move.opposite(),
            }
        } else if self.stalemate {
            GameStatus::Stalemate
        } else {
            GameStatus::Ongoing
        }
    }

    /// True when both cached king squares hold a king of the right color.
    pub fn king_cache_is_consistent(&self) -> bool {
        [Color::Light, Color::Dark].into_iter().all(|color| {
            self.piece_at(self.king_square(color))
                .is_some_and(|piece| piece.is(color, PieceKind::King))
        })
    }

    /// Iterates every occupied square in row-major order.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::new(row as i8, col as i8), piece))
            })
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

fn locate_king(board: &Board, color: Color) -> Result<Square, ChessError> {
    let mut found = None;
    for (row, cells) in board.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if cell.is_some_and(|piece| piece.is(color, PieceKind::King)) {
                if found.is_some() {
                    return Err(ChessError::DuplicateKing(color));
                }
                found = Some(Square::new(row as i8, col as i8));
            }
        }
    }
    found.ok_or(ChessError::MissingKing(color))
}
