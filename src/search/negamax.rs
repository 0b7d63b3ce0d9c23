//! Fixed-depth negamax with alpha-beta pruning.
//!
//! The search mutates one private `GameState` in place with execute/undo and
//! returns the root score together with the move that achieved it.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{execute_move, undo_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::{BoardScorer, PositionTableScorer, Score, CHECKMATE_SCORE};
use crate::search::threading::SharedSearchState;

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;
pub const MAX_SEARCH_DEPTH: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    /// Shuffle the root moves once so equal scores don't always pick the same move.
    pub shuffle_root_moves: bool,
    /// Seed for the root shuffle; `None` draws a fresh one.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            shuffle_root_moves: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Score from the side to move's point of view.
    pub score: Score,
    pub best_move: Option<ChessMove>,
    pub nodes: u64,
    /// Set when the stop flag cut the search short.
    pub stopped: bool,
}

struct Searcher<'a> {
    scorer: &'a dyn BoardScorer,
    shared: &'a SharedSearchState,
    nodes: u64,
}

impl Searcher<'_> {
    fn negamax(
        &mut self,
        game_state: &mut GameState,
        moves: &[ChessMove],
        depth: u8,
        mut alpha: Score,
        beta: Score,
        sign: Score,
    ) -> Score {
        self.nodes += 1;
        if depth == 0 || moves.is_empty() {
            return sign * self.scorer.score(game_state);
        }

        let mut best = Score::NEG_INFINITY;
        for mv in moves {
            if self.shared.should_stop() {
                break;
            }
            execute_move(game_state, mv);
            let replies = generate_legal_moves(game_state);
            let score = -self.negamax(game_state, &replies, depth - 1, -beta, -alpha, -sign);
            undo_move(game_state);

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Searches `root_moves` from `game_state` to `config.depth` plies.
///
/// `game_state` is returned to its starting position. An empty move list
/// yields no best move; otherwise the first move searched is recorded even if
/// every line loses.
pub fn negamax_root(
    game_state: &mut GameState,
    root_moves: &[ChessMove],
    config: &SearchConfig,
    scorer: &dyn BoardScorer,
    shared: &SharedSearchState,
) -> SearchOutcome {
    let depth = config.depth.clamp(1, MAX_SEARCH_DEPTH);
    let mut moves = root_moves.to_vec();
    if config.shuffle_root_moves {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        moves.shuffle(&mut rng);
    }

    let mut searcher = Searcher {
        scorer,
        shared,
        nodes: 1,
    };
    let sign = game_state.side_to_move.sign();
    let mut alpha = -CHECKMATE_SCORE;
    let beta = CHECKMATE_SCORE;
    let mut best_score = -CHECKMATE_SCORE;
    let mut best_move: Option<ChessMove> = None;

    for mv in &moves {
        if shared.should_stop() {
            break;
        }
        execute_move(game_state, mv);
        let replies = generate_legal_moves(game_state);
        let score = -searcher.negamax(game_state, &replies, depth - 1, -beta, -alpha, -sign);
        undo_move(game_state);

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(*mv);
            debug!("root best {mv} score {score:.2}");
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            break;
        }
    }

    shared.add_nodes(searcher.nodes);
    let stopped = shared.should_stop();
    debug!(
        "search depth {depth} finished: best {} score {best_score:.2} nodes {}{}",
        best_move.map_or_else(|| "none".to_owned(), |mv| mv.notation()),
        searcher.nodes,
        if stopped { " (stopped)" } else { "" }
    );

    SearchOutcome {
        score: best_score,
        best_move,
        nodes: searcher.nodes,
        stopped,
    }
}

/// Best move for the side to move among `legal_moves`, searched on a private
/// copy of `game_state` with the default scorer.
pub fn find_best_move(
    game_state: &GameState,
    legal_moves: &[ChessMove],
    config: &SearchConfig,
) -> Option<ChessMove> {
    let mut scratch = game_state.clone();
    let shared = SharedSearchState::new();
    negamax_root(&mut scratch, legal_moves, config, &PositionTableScorer, &shared).best_move
}
