use std::collections::VecDeque;

use itertools::Itertools;
use log::warn;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::board::{Position, GRID_SIZE};

/// Random draws tried before falling back to scanning for free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 4 * (GRID_SIZE * GRID_SIZE) as usize;

pub trait FoodPlacer {
    /// Picks a cell not occupied by the snake, or `None` if the snake covers
    /// the whole grid.
    fn place(&mut self, snake: &VecDeque<Position>) -> Option<Position>;
}

impl<F> FoodPlacer for F
where
    F: FnMut(&VecDeque<Position>) -> Option<Position>,
{
    fn place(&mut self, snake: &VecDeque<Position>) -> Option<Position> {
        self(snake)
    }
}

/// Uniform placement over the free cells of the grid.
pub struct RandomFood<R = StdRng> {
    rng: R,
}

impl RandomFood {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomFood {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomFood<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> FoodPlacer for RandomFood<R> {
    fn place(&mut self, snake: &VecDeque<Position>) -> Option<Position> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = Position::new(
                self.rng.gen_range(0..GRID_SIZE),
                self.rng.gen_range(0..GRID_SIZE),
            );
            if !snake.contains(&candidate) {
                return Some(candidate);
            }
        }

        // a long snake makes rejection sampling slow, so pick from what's left
        let free: Vec<Position> = (0..GRID_SIZE)
            .cartesian_product(0..GRID_SIZE)
            .map(|(x, y)| Position::new(x, y))
            .filter(|cell| !snake.contains(cell))
            .collect();

        if free.is_empty() {
            warn!("no free cell left for food on a snake of {}", snake.len());
        }

        free.choose(&mut self.rng).copied()
    }
}
