//! Random movement that refuses to walk into walls or bodies when it has a
//! choice.

pub mod board;

use std::sync::Mutex;

use itertools::Itertools;
use log::{debug, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub use self::board::Board;
use super::Strategy;
use crate::fightsnake::{
    models::GameState,
    types::{Coord, Direction},
};

/// Every direction whose destination is on the board and unoccupied, in
/// `Direction::ALL` order.
pub fn safe_directions(board: &Board, head: Coord) -> Vec<Direction> {
    Direction::iter()
        .copied()
        .filter(|d| board.is_safe(head.neighbour(*d)))
        .collect()
}

/// Uniform pick from `safe`, or from all four directions when nothing is safe.
pub fn choose_direction<R: Rng + ?Sized>(
    safe: &[Direction],
    rng: &mut R,
) -> Direction {
    let candidates = if safe.is_empty() {
        &Direction::ALL[..]
    } else {
        safe
    };
    candidates[rng.gen_range(0..candidates.len())]
}

#[derive(Debug, Default)]
pub struct Cautious {
    rng: Option<Mutex<StdRng>>,
}

impl Cautious {
    /// Draws from the thread-local generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { rng: None }
    }

    /// Draws from a fixed-seed generator, for reproducible games.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn choose(&self, safe: &[Direction]) -> Direction {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                choose_direction(safe, &mut *rng)
            }
            None => choose_direction(safe, &mut rand::thread_rng()),
        }
    }
}

impl Strategy for Cautious {
    fn get_movement(&self, game_state: &GameState) -> Direction {
        let board = Board::from(game_state);
        trace!("game {} turn {}:\n{board}", game_state.game.id, game_state.turn);

        let safe = game_state
            .you
            .head()
            .map(|head| safe_directions(&board, head))
            .unwrap_or_default();

        if safe.is_empty() {
            warn!(
                "game {} turn {}: no safe moves, picking blindly",
                game_state.game.id, game_state.turn
            );
        } else {
            debug!(
                "game {} turn {}: facing {}, safe moves: {}",
                game_state.game.id,
                game_state.turn,
                game_state
                    .you
                    .facing()
                    .map_or_else(|| "nowhere".to_owned(), |d| d.to_string()),
                safe.iter().join(", ")
            );
        }

        let movement = self.choose(&safe);
        debug!(
            "game {} turn {}: moving {movement}",
            game_state.game.id, game_state.turn
        );
        movement
    }
}
