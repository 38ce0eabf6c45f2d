pub mod cautious;

pub use cautious::Cautious;

use crate::fightsnake::{models::GameState, types::Direction};

pub trait Strategy {
    /// Picks the move for this turn. Always produces a direction, even when
    /// every option is fatal.
    fn get_movement(&self, game_state: &GameState) -> Direction;
}
