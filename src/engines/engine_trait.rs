//! Engine abstraction used by the match harness and the command-line driver.
//!
//! Engines choose among the legal moves they are handed; they never see a
//! move list that has not come from the legal move generator.

use crate::errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;
use crate::search::negamax::SearchConfig;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), ChessError> {
        Err(ChessError::UnknownOption(name.to_owned()))
    }

    /// Search settings when this engine wants its moves searched on a
    /// background worker instead of through `choose_move`.
    fn background_search(&self) -> Option<SearchConfig> {
        None
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        legal_moves: &[ChessMove],
    ) -> Result<EngineOutput, ChessError>;
}
