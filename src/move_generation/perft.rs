use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{execute_move, undo_move};
use crate::move_generation::legal_move_checks::inspect_king;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::ChessMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Counts leaf positions `depth` plies below `game_state`, executing and
/// undoing every move in place. The position is unchanged on return.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(game_state, depth, &mut counts);
    counts
}

/// Same counts as [`perft`], with each root move searched on its own thread
/// against a private copy of the position.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth <= 1 {
        return perft(&mut game_state.clone(), depth);
    }

    let mut root = game_state.clone();
    let root_moves = generate_legal_moves(&mut root);

    let handles: Vec<_> = root_moves
        .into_iter()
        .map(|mv| {
            let mut local_state = root.clone();
            thread::spawn(move || {
                let mut local = PerftCounts::default();
                execute_move(&mut local_state, &mv);
                perft_recurse(&mut local_state, depth - 1, &mut local);
                local
            })
        })
        .collect();

    let mut total = PerftCounts::default();
    for handle in handles {
        match handle.join() {
            Ok(local) => total.merge(local),
            // A worker can only fail by panicking; resurface it here.
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
    total
}

/// Node counts per root move, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(ChessMove, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = generate_legal_moves(game_state);
    moves
        .into_iter()
        .map(|mv| {
            execute_move(game_state, &mv);
            let nodes = perft(game_state, depth - 1).nodes;
            undo_move(game_state);
            (mv, nodes)
        })
        .collect()
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    let moves = generate_legal_moves(game_state);

    if depth == 1 {
        for mv in &moves {
            record_leaf(game_state, mv, counts);
        }
        return;
    }

    for mv in &moves {
        execute_move(game_state, mv);
        perft_recurse(game_state, depth - 1, counts);
        undo_move(game_state);
    }
}

fn record_leaf(game_state: &mut GameState, mv: &ChessMove, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant {
        counts.en_passant += 1;
    }
    if mv.is_castle {
        counts.castles += 1;
    }
    if mv.is_promotion {
        counts.promotions += 1;
    }

    execute_move(game_state, mv);
    let defender = game_state.side_to_move;
    let king_square = game_state.king_square(defender);
    if inspect_king(&game_state.board, defender, king_square).in_check {
        counts.checks += 1;
        if generate_legal_moves(game_state).is_empty() {
            counts.checkmates += 1;
        }
    }
    undo_move(game_state);
}
