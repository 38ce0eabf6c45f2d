use std::collections::HashSet;

use crate::fightsnake::{
    models::{GameState, Snake},
    types::Coord,
};

#[derive(Clone, Debug)]
pub struct Board {
    pub width:    i64,
    pub height:   i64,
    pub occupied: HashSet<Coord>,
}

impl Board {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            occupied: HashSet::new(),
        }
    }

    /// Marks everything but the tail as occupied. The tail moves out of the
    /// way this turn; a stacked tail after eating leaves its duplicate behind.
    pub fn occupy(&mut self, snake: &Snake) {
        let keep = snake.body.len().saturating_sub(1);
        self.occupied.extend(snake.body.iter().take(keep).copied());
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width
            && coord.y < self.height
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.occupied.contains(&coord)
    }

    pub fn is_safe(&self, coord: Coord) -> bool {
        self.contains(coord) && !self.is_occupied(coord)
    }
}

impl From<&GameState> for Board {
    fn from(state: &GameState) -> Self {
        let mut board = Self::new(state.board.width, state.board.height);
        for snake in &state.board.snakes {
            board.occupy(snake);
        }
        // `you` is normally also in board.snakes; the set absorbs the repeat.
        board.occupy(&state.you);
        board
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                if self.is_occupied(Coord { x, y }) {
                    write!(f, "#")?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
