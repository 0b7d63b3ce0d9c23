//! Random-move engine.
//!
//! Selects uniformly from legal moves. Doubles as the fallback whenever a
//! search ends without a move.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;

/// Uniform pick from `legal_moves`; `None` only when the list is empty.
pub fn find_random_move<R: Rng + ?Sized>(legal_moves: &[ChessMove], rng: &mut R) -> Option<ChessMove> {
    legal_moves.choose(rng).copied()
}

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessError> {
        match name {
            "Seed" => {
                let seed = value.parse::<u64>().map_err(|_| ChessError::InvalidOptionValue {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })?;
                self.rng = StdRng::seed_from_u64(seed);
                Ok(())
            }
            _ => Err(ChessError::UnknownOption(name.to_owned())),
        }
    }

    fn choose_move(
        &mut self,
        _game_state: &GameState,
        legal_moves: &[ChessMove],
    ) -> Result<EngineOutput, ChessError> {
        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));
        out.best_move = find_random_move(legal_moves, &mut self.rng);
        Ok(out)
    }
}
