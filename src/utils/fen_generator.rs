use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

/// FEN for the current position. The halfmove clock is always written as 0;
/// the fullmove number counts from 1 at the first recorded move.
pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(&game_state.board);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state.castling_rights());
    let en_passant = game_state
        .en_passant_target()
        .map_or_else(|| "-".to_owned(), square_to_algebraic);

    format!(
        "{} {} {} {} 0 {}",
        board,
        side_to_move,
        castling,
        en_passant,
        fullmove_number(game_state)
    )
}

fn fullmove_number(game_state: &GameState) -> usize {
    let plies = game_state.move_log.len();
    let started_with_dark = (game_state.side_to_move == Color::Dark) == (plies % 2 == 0);
    1 + (plies + usize::from(started_with_dark)) / 2
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for (row, cells) in board.iter().enumerate() {
        let mut empty_count = 0u8;

        for cell in cells {
            match cell {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if rights.light_kingside {
        out.push('K');
    }
    if rights.light_queenside {
        out.push('Q');
    }
    if rights.dark_kingside {
        out.push('k');
    }
    if rights.dark_queenside {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}
