//! FEN-to-GameState parser.
//!
//! Reads the board, side to move, castling rights and en passant fields. The
//! two clock fields are optional and only checked for well-formedness; the
//! position model does not track them.

use crate::errors::ChessError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::inspect_king;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| invalid("missing en passant square"))?;

    if let Some(halfmove_part) = parts.next() {
        halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("bad halfmove clock '{halfmove_part}'")))?;
    }
    if let Some(fullmove_part) = parts.next() {
        fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("bad fullmove number '{fullmove_part}'")))?;
    }
    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_target = parse_en_passant_square(en_passant_part, side_to_move, &board)?;

    let game_state = GameState::from_parts(board, side_to_move, castling_rights, en_passant_target)?;

    let waiting = side_to_move.opposite();
    if inspect_king(&game_state.board, waiting, game_state.king_square(waiting)).in_check {
        return Err(invalid("the side not to move is in check"));
    }
    Ok(game_state)
}

fn invalid(reason: &str) -> ChessError {
    ChessError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str) -> Result<Board, ChessError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board: Board = [[None; 8]; 8];
    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}'")))?;
            if col >= 8 {
                return Err(invalid(&format!("rank '{rank_str}' has too many files")));
            }
            board[row][col] = Some(piece);
            col += 1;
        }

        if col != 8 {
            return Err(invalid(&format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("invalid side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessError> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_kingside = true,
            'Q' => rights.light_queenside = true,
            'k' => rights.dark_kingside = true,
            'q' => rights.dark_queenside = true,
            _ => return Err(invalid(&format!("invalid castling character '{ch}'"))),
        }
    }
    Ok(rights)
}

/// The target must be the empty square a two-square advance of the side that
/// just moved passes over, with that pawn standing just beyond it.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
    board: &Board,
) -> Result<Option<Square>, ChessError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(&format!("invalid en passant square '{en_passant_part}'")))?;
    let mover = side_to_move.opposite();
    if square.row != mover.pawn_row() + mover.pawn_forward() {
        return Err(invalid(&format!(
            "en passant square '{en_passant_part}' is on the wrong rank"
        )));
    }

    let pawn_row = (square.row + mover.pawn_forward()) as usize;
    let col = square.col as usize;
    if board[square.row as usize][col].is_some()
        || board[pawn_row][col] != Some(Piece::new(mover, PieceKind::Pawn))
    {
        return Err(invalid(&format!(
            "en passant square '{en_passant_part}' has no pawn that just advanced past it"
        )));
    }
    Ok(Some(square))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
