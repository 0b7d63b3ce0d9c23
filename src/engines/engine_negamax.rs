//! Fixed-depth negamax engine.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_random::find_random_move;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::PositionTableScorer;
use crate::search::negamax::{negamax_root, SearchConfig, MAX_SEARCH_DEPTH};
use crate::search::threading::SharedSearchState;

#[derive(Debug, Clone, Default)]
pub struct NegamaxEngine {
    config: SearchConfig,
}

impl NegamaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::new(SearchConfig {
            depth,
            ..SearchConfig::default()
        })
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

fn invalid(name: &str, value: &str) -> ChessError {
    ChessError::InvalidOptionValue {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

impl Engine for NegamaxEngine {
    fn name(&self) -> &str {
        "Negamax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessError> {
        match name {
            "Depth" => {
                let depth = value
                    .parse::<u8>()
                    .ok()
                    .filter(|d| (1..=MAX_SEARCH_DEPTH).contains(d))
                    .ok_or_else(|| invalid(name, value))?;
                self.config.depth = depth;
            }
            "ShuffleRootMoves" => {
                self.config.shuffle_root_moves =
                    value.parse::<bool>().map_err(|_| invalid(name, value))?;
            }
            "Seed" => {
                self.config.seed = Some(value.parse::<u64>().map_err(|_| invalid(name, value))?);
            }
            _ => return Err(ChessError::UnknownOption(name.to_owned())),
        }
        Ok(())
    }

    fn background_search(&self) -> Option<SearchConfig> {
        Some(self.config)
    }

    /// Searches in the calling thread. Falls back to a random legal move when
    /// the search produces none.
    fn choose_move(
        &mut self,
        game_state: &GameState,
        legal_moves: &[ChessMove],
    ) -> Result<EngineOutput, ChessError> {
        let mut scratch = game_state.clone();
        let shared = SharedSearchState::new();
        let outcome = negamax_root(
            &mut scratch,
            legal_moves,
            &self.config,
            &PositionTableScorer,
            &shared,
        );

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "negamax depth {} score {:.2} nodes {}",
            self.config.depth, outcome.score, outcome.nodes
        ));
        out.best_move = outcome.best_move.or_else(|| {
            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            find_random_move(legal_moves, &mut rng)
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::search::negamax::DEFAULT_SEARCH_DEPTH;

    #[test]
    fn options_update_the_search_config() {
        let mut engine = NegamaxEngine::default();
        assert_eq!(engine.config().depth, DEFAULT_SEARCH_DEPTH);

        engine.set_option("Depth", "2").expect("depth 2 is valid");
        engine
            .set_option("ShuffleRootMoves", "false")
            .expect("bool option");
        engine.set_option("Seed", "42").expect("seed option");
        assert_eq!(
            *engine.config(),
            SearchConfig {
                depth: 2,
                shuffle_root_moves: false,
                seed: Some(42),
            }
        );
    }

    #[test]
    fn rejects_out_of_range_depth_and_unknown_names() {
        let mut engine = NegamaxEngine::default();
        assert!(matches!(
            engine.set_option("Depth", "0"),
            Err(ChessError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            engine.set_option("Depth", "9"),
            Err(ChessError::InvalidOptionValue { .. })
        ));
        assert_eq!(
            engine.set_option("Hash", "16"),
            Err(ChessError::UnknownOption("Hash".to_owned()))
        );
    }

    #[test]
    fn chooses_a_legal_move() {
        let mut engine = NegamaxEngine::with_depth(2);
        let mut game = GameState::new_game();
        let moves = generate_legal_moves(&mut game);
        let out = engine.choose_move(&game, &moves).expect("search never fails");
        let best = out.best_move.expect("a move is available");
        assert!(moves.contains(&best));
        assert_eq!(engine.background_search(), Some(*engine.config()));
    }

    #[test]
    fn no_moves_means_no_choice() {
        let mut engine = NegamaxEngine::with_depth(1);
        let game = GameState::new_game();
        let out = engine.choose_move(&game, &[]).expect("search never fails");
        assert!(out.best_move.is_none());
    }
}
