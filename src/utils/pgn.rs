//! PGN-style game records.
//!
//! Records are written with the human-readable notation of each move, or
//! with long algebraic movetext when they need to be read back in; only the
//! long algebraic form is parsed.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::errors::ChessError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::game_state::{GameState, GameStatus};
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_apply::execute_move;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveText {
    Notation,
    LongAlgebraic,
}

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub move_history: Vec<ChessMove>,
    pub final_state: GameState,
    pub result: String,
}

/// Result token for a finished or unfinished game.
pub fn result_token(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Checkmate {
            winner: Color::Light,
        } => "1-0",
        GameStatus::Checkmate {
            winner: Color::Dark,
        } => "0-1",
        GameStatus::Stalemate => "1/2-1/2",
        GameStatus::Ongoing => "*",
    }
}

/// Standard headers dated `date`.
pub fn default_headers(
    initial_state: &GameState,
    white: &str,
    black: &str,
    result: &str,
    date: NaiveDate,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Ray Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), date.format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }
    headers
}

/// Writes a record dated today.
pub fn write_pgn(
    initial_state: &GameState,
    move_history: &[ChessMove],
    white: &str,
    black: &str,
    result: &str,
) -> String {
    let headers = default_headers(
        initial_state,
        white,
        black,
        result,
        Local::now().date_naive(),
    );
    write_pgn_with_headers(move_history, &headers, MoveText::Notation)
}

pub fn write_pgn_with_headers(
    move_history: &[ChessMove],
    headers: &BTreeMap<String, String>,
    style: MoveText,
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let dark_starts = headers
        .get("FEN")
        .and_then(|fen| fen.split_whitespace().nth(1))
        == Some("b");

    let mut movetext_parts = Vec::<String>::with_capacity(move_history.len() + 1);
    for (index, mv) in move_history.iter().enumerate() {
        let text = match style {
            MoveText::Notation => mv.notation(),
            MoveText::LongAlgebraic => move_to_long_algebraic(mv),
        };
        let ply = index + usize::from(dark_starts);
        if index == 0 && dark_starts {
            movetext_parts.push(format!("1... {text}"));
        } else if ply % 2 == 0 {
            movetext_parts.push(format!("{}. {}", ply / 2 + 1, text));
        } else {
            movetext_parts.push(text);
        }
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Parses a record whose movetext is long algebraic, replaying every move
/// through the legal move generator.
pub fn read_pgn(pgn: &str) -> Result<PgnGame, ChessError> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let initial_state = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessError::InvalidPgn("SetUp is 1 but the FEN header is missing".to_owned())
        })?;
        GameState::from_fen(fen)?
    } else {
        GameState::new_game()
    };

    let mut state = initial_state.clone();
    let mut move_history = Vec::<ChessMove>::new();
    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }

        let mv = long_algebraic_to_move(cleaned, &mut state)?;
        execute_move(&mut state, &mv);
        move_history.push(mv);
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        initial_state,
        move_history,
        final_state: state,
        result,
    })
}

fn parse_header_line(line: &str) -> Result<(String, String), ChessError> {
    let bad = || ChessError::InvalidPgn(format!("malformed header: {line}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(bad)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(bad)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(bad)?;
    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let head = token.trim_end_matches('.');
    head.len() < token.len() && !head.is_empty() && head.chars().all(|c| c.is_ascii_digit())
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;

    fn play(game: &mut GameState, moves: &[&str]) -> Vec<ChessMove> {
        moves
            .iter()
            .map(|lan| {
                let mv = long_algebraic_to_move(lan, game).expect("LAN should be legal");
                execute_move(game, &mv);
                mv
            })
            .collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).expect("valid date")
    }

    #[test]
    fn notation_movetext_and_headers() {
        let mut game = GameState::new_game();
        let history = play(&mut game, &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3"]);
        let headers = default_headers(&GameState::new_game(), "Negamax", "Random", "*", date());
        let pgn = write_pgn_with_headers(&history, &headers, MoveText::Notation);

        assert!(pgn.contains("[Date \"2024.05.17\"]"));
        assert!(pgn.contains("[White \"Negamax\"]"));
        assert!(!pgn.contains("[FEN"));
        assert!(pgn.ends_with("1. e4 d5 2. exd5 Qxd5 3. Nc3 *\n"));
    }

    #[test]
    fn long_algebraic_round_trip() {
        let mut game = GameState::new_game();
        let history = play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);
        let headers = default_headers(&GameState::new_game(), "White", "Black", "*", date());
        let pgn = write_pgn_with_headers(&history, &headers, MoveText::LongAlgebraic);

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.move_history, history);
        assert_eq!(parsed.final_state.get_fen(), game.get_fen());
        assert_eq!(parsed.result, "*");
        assert_eq!(parsed.headers.get("Date").map(String::as_str), Some("2024.05.17"));
    }

    #[test]
    fn custom_setup_with_dark_to_move() {
        let initial =
            GameState::from_fen("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let mut game = initial.clone();
        let history = play(&mut game, &["e7e5", "e1d2"]);
        let headers = default_headers(&initial, "A", "B", "1/2-1/2", date());
        let pgn = write_pgn_with_headers(&history, &headers, MoveText::LongAlgebraic);

        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("1... e7e5 2. e1d2 1/2-1/2"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.initial_state.get_fen(), initial.get_fen());
        assert_eq!(parsed.move_history, history);
        assert_eq!(parsed.result, "1/2-1/2");
    }

    #[test]
    fn result_tokens_follow_status() {
        let mut mated =
            GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        generate_legal_moves(&mut mated);
        assert_eq!(result_token(mated.status()), "1-0");
        assert_eq!(result_token(GameStatus::Stalemate), "1/2-1/2");
        assert_eq!(result_token(GameStatus::Ongoing), "*");
    }

    #[test]
    fn rejects_illegal_movetext_and_bad_headers() {
        let pgn = "[Event \"x\"]\n\n1. e2e5 *\n";
        assert!(matches!(read_pgn(pgn), Err(ChessError::IllegalMove(_))));

        let pgn = "[Event x]\n\n1. e2e4 *\n";
        assert!(matches!(read_pgn(pgn), Err(ChessError::InvalidPgn(_))));
    }
}
