use std::{collections::VecDeque, fmt};

use log::debug;
use serde::Serialize;

use super::{
    events::{EndCause, GameEvent},
    food::FoodPlacer,
};
use crate::board::{Direction, Position, GRID_SIZE};

pub const INITIAL_HEAD: Position = Position::new(5, 5);
pub const INITIAL_DIRECTION: Direction = Direction::Right;
pub const INITIAL_FOOD: Position = Position::new(10, 10);

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Head first. Never empty.
    pub snake:     VecDeque<Position>,
    pub direction: Direction,
    pub food:      Position,
    pub score:     u64,
    pub is_over:   bool,
}

/// What occupies a single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Head,
    /// Body segment with its index in the snake, counting the head as zero.
    Body(usize),
    Food,
    Empty,
}

/// The fixed state every game starts from.
#[must_use]
pub fn reset() -> GameState {
    GameState::new(
        VecDeque::from([INITIAL_HEAD]),
        INITIAL_DIRECTION,
        INITIAL_FOOD,
    )
}

/// Adopts `requested` unless it would turn the snake straight back into its
/// own neck.
#[must_use]
pub fn change_direction(current: Direction, requested: Direction) -> Direction {
    if requested == current.opposite() {
        current
    } else {
        requested
    }
}

impl GameState {
    #[must_use]
    pub fn new(
        snake: VecDeque<Position>,
        direction: Direction,
        food: Position,
    ) -> Self {
        debug_assert!(!snake.is_empty(), "a snake needs at least a head");
        Self {
            snake,
            direction,
            food,
            score: 0,
            is_over: false,
        }
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.snake.contains(&position)
    }

    #[must_use]
    pub fn cell(&self, position: Position) -> Cell {
        match self.snake.iter().position(|s| *s == position) {
            Some(0) => Cell::Head,
            Some(index) => Cell::Body(index),
            None if position == self.food => Cell::Food,
            None => Cell::Empty,
        }
    }

    /// Advances the game by one tick, moving the snake one cell in
    /// `direction`. The direction is trusted; reversal is filtered out by
    /// [`change_direction`] before it gets here.
    ///
    /// A finished game is returned unchanged. On self-collision the returned
    /// state keeps the body from before the move and is marked over.
    pub fn step<F>(
        &self,
        direction: Direction,
        food: &mut F,
    ) -> (Self, Vec<GameEvent>)
    where
        F: FoodPlacer + ?Sized,
    {
        if self.is_over {
            return (self.clone(), vec![]);
        }

        let mut events = vec![];
        let mut next = self.clone();
        next.direction = direction;

        let head = self.head().neighbour(direction);
        next.snake.push_front(head);

        if head == self.food {
            next.score += 1;
            events.push(GameEvent::FoodEaten {
                at:    head,
                score: next.score,
            });

            if let Some(position) = food.place(&next.snake) {
                next.food = position;
            } else {
                debug!("snake of {} fills the board", next.len());
                next.is_over = true;
                events.push(GameEvent::GameOver {
                    score: next.score,
                    cause: EndCause::BoardFull,
                });
                return (next, events);
            }
        } else {
            next.snake.pop_back();
        }

        if next.snake.iter().skip(1).any(|segment| *segment == head) {
            debug!("snake ran into itself at {}", head);
            next.snake.clone_from(&self.snake);
            next.is_over = true;
            events.push(GameEvent::GameOver {
                score: next.score,
                cause: EndCause::SelfCollision,
            });
        }

        (next, events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        reset()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let glyph = match self.cell(Position::new(x, y)) {
                    Cell::Head => '@',
                    Cell::Body(_) => 'o',
                    Cell::Food => '*',
                    Cell::Empty => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
