//! Head-to-head match driver.
//!
//! Plays two `Engine`s against each other from a starting position. Engines
//! that ask for background search are dispatched to a `SearchTask` and
//! polled without blocking; any in-flight search is cancelled when the
//! position it was started from is undone or reset, so a stale result is
//! never applied. A search that ends without a move is replaced by a random
//! legal move.

use std::thread;
use std::time::Duration;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_random::find_random_move;
use crate::engines::engine_trait::Engine;
use crate::errors::ChessError;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::{GameState, GameStatus, PositionKey};
use crate::move_generation::legal_move_apply::{execute_move, undo_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::search::threading::{SearchStatus, SearchTask};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    LightWinCheckmate,
    DarkWinCheckmate,
    DrawStalemate,
    DrawRepetition,
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn result_token(self) -> &'static str {
        match self {
            MatchOutcome::LightWinCheckmate => "1-0",
            MatchOutcome::DarkWinCheckmate => "0-1",
            _ => "1/2-1/2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub poll_interval_ms: u64,
    /// Occurrences of one position that end the game as a draw.
    pub repetition_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            poll_interval_ms: 5,
            repetition_limit: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub initial_state: GameState,
    pub final_state: GameState,
    pub played_moves: Vec<ChessMove>,
    pub played_moves_lan: Vec<String>,
    pub fallback_moves: u32,
}

/// What one call to [`MatchDriver::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchStep {
    Played(ChessMove),
    Waiting,
    Finished(MatchOutcome),
}

pub struct MatchDriver {
    initial_state: GameState,
    state: GameState,
    legal_moves: Vec<ChessMove>,
    engines: [Box<dyn Engine>; 2],
    pending: Option<SearchTask>,
    position_history: Vec<PositionKey>,
    config: MatchConfig,
    fallback_rng: StdRng,
    fallback_moves: u32,
}

impl MatchDriver {
    pub fn new(
        light: Box<dyn Engine>,
        dark: Box<dyn Engine>,
        start: GameState,
        config: MatchConfig,
        seed: Option<u64>,
    ) -> Self {
        let fallback_rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut driver = Self {
            initial_state: start.clone(),
            state: start,
            legal_moves: Vec::new(),
            engines: [light, dark],
            pending: None,
            position_history: Vec::new(),
            config,
            fallback_rng,
            fallback_moves: 0,
        };
        driver.start_from_initial();
        driver
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn legal_moves(&self) -> &[ChessMove] {
        &self.legal_moves
    }

    /// Dispatch id of the search currently running, if any.
    pub fn pending_dispatch(&self) -> Option<u64> {
        self.pending.as_ref().map(SearchTask::dispatch_id)
    }

    /// Terminal result of the current position, if the game is over.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.state.status() {
            GameStatus::Checkmate {
                winner: Color::Light,
            } => return Some(MatchOutcome::LightWinCheckmate),
            GameStatus::Checkmate {
                winner: Color::Dark,
            } => return Some(MatchOutcome::DarkWinCheckmate),
            GameStatus::Stalemate => return Some(MatchOutcome::DrawStalemate),
            GameStatus::Ongoing => {}
        }
        if self.repetition_count() >= self.config.repetition_limit {
            return Some(MatchOutcome::DrawRepetition);
        }
        if self.plies_played() >= usize::from(self.config.max_plies) {
            return Some(MatchOutcome::DrawMaxPlies);
        }
        None
    }

    /// How many times the current position has occurred in this game.
    pub fn repetition_count(&self) -> usize {
        let current = self.state.position_key();
        self.position_history
            .iter()
            .filter(|key| **key == current)
            .count()
    }

    pub fn plies_played(&self) -> usize {
        self.state.move_log.len() - self.initial_state.move_log.len()
    }

    /// Advance the game by at most one move without blocking.
    pub fn step(&mut self) -> Result<MatchStep, ChessError> {
        if let Some(outcome) = self.outcome() {
            return Ok(MatchStep::Finished(outcome));
        }

        let mover = self.state.side_to_move.index();
        let chosen = match self.engines[mover].background_search() {
            Some(config) => {
                let task = self.pending.get_or_insert_with(|| {
                    SearchTask::spawn(&self.state, &self.legal_moves, config)
                });
                match task.poll() {
                    SearchStatus::Running => return Ok(MatchStep::Waiting),
                    SearchStatus::Cancelled => {
                        self.pending = None;
                        return Ok(MatchStep::Waiting);
                    }
                    SearchStatus::Completed(report) => {
                        self.pending = None;
                        report.best_move
                    }
                }
            }
            None => {
                self.engines[mover]
                    .choose_move(&self.state, &self.legal_moves)?
                    .best_move
            }
        };

        let mv = match chosen {
            Some(mv) => mv,
            None => {
                let fallback = find_random_move(&self.legal_moves, &mut self.fallback_rng)
                    .ok_or_else(|| ChessError::IllegalMove("no legal moves".to_owned()))?;
                self.fallback_moves += 1;
                warn!(
                    "{} produced no move; playing random {fallback}",
                    self.engines[mover].name()
                );
                fallback
            }
        };

        self.apply(mv)?;
        Ok(MatchStep::Played(mv))
    }

    /// Plays a human or scripted move for the side to move.
    pub fn apply(&mut self, mv: ChessMove) -> Result<(), ChessError> {
        let legal = self
            .legal_moves
            .iter()
            .find(|candidate| **candidate == mv)
            .copied()
            .ok_or_else(|| ChessError::IllegalMove(mv.notation()))?;

        self.cancel_pending();
        execute_move(&mut self.state, &legal);
        self.refresh();
        Ok(())
    }

    /// Takes back the last move, cancelling any search started after it.
    pub fn undo_last(&mut self) -> Option<ChessMove> {
        if self.plies_played() == 0 {
            return None;
        }
        self.cancel_pending();
        let undone = undo_move(&mut self.state)?;
        self.position_history.pop();
        self.legal_moves = generate_legal_moves(&mut self.state);
        Some(undone)
    }

    /// Returns to the starting position, cancelling any search in flight.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state = self.initial_state.clone();
        self.start_from_initial();
        for engine in &mut self.engines {
            engine.new_game();
        }
    }

    /// Runs the game to completion, sleeping between polls.
    pub fn play(mut self) -> Result<MatchResult, ChessError> {
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let outcome = loop {
            match self.step()? {
                MatchStep::Finished(outcome) => break outcome,
                MatchStep::Waiting => thread::sleep(poll_interval),
                MatchStep::Played(_) => {}
            }
        };

        let played_moves = self.state.move_log[self.initial_state.move_log.len()..].to_vec();
        info!(
            "match finished after {} plies: {:?} ({})",
            played_moves.len(),
            outcome,
            outcome.result_token()
        );

        Ok(MatchResult {
            outcome,
            played_moves_lan: played_moves.iter().map(move_to_long_algebraic).collect(),
            played_moves,
            initial_state: self.initial_state.clone(),
            final_state: self.state.clone(),
            fallback_moves: self.fallback_moves,
        })
    }

    fn start_from_initial(&mut self) {
        self.position_history.clear();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.position_history.push(self.state.position_key());
        self.legal_moves = generate_legal_moves(&mut self.state);
    }

    fn cancel_pending(&mut self) {
        if let Some(mut task) = self.pending.take() {
            task.cancel();
        }
    }
}

impl Drop for MatchDriver {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
