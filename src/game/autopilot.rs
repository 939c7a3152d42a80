use std::collections::VecDeque;

use itertools::Itertools;

use super::state::{change_direction, GameState};
use crate::board::{utils::toroidal_distance, Direction, Position};

const DEAD: i64 = -1_000_000;
const FOOD_DISTANCE_WEIGHT: i64 = -10;
const ESCAPE_ROUTE_WEIGHT: i64 = 25;

/// Picks the next heading by trying every legal move one step ahead and
/// keeping the best scoring one. Prefers short paths to food and cells with
/// room to keep moving.
#[must_use]
pub fn choose(state: &GameState) -> Direction {
    Direction::iter()
        .copied()
        .filter(|d| change_direction(state.direction, *d) == *d)
        .map(|d| (d, score(state, d)))
        // max_by_key keeps the last maximum, so put the current heading last
        .sorted_by_key(|(d, _)| *d == state.direction)
        .max_by_key(|(_, score)| *score)
        .map_or(state.direction, |(d, _)| d)
}

fn score(state: &GameState, direction: Direction) -> i64 {
    // where the next food lands doesn't matter for a one step lookahead
    let mut keep_food = |_: &VecDeque<Position>| Some(state.food);
    let (next, _) = state.step(direction, &mut keep_food);

    if next.is_over {
        return DEAD;
    }

    let head = next.head();
    // the tail leaves its cell on the following tick
    let blocking = next.len().saturating_sub(1);
    let escape_routes = Direction::iter()
        .filter(|d| **d != direction.opposite())
        .filter(|d| {
            !next
                .snake
                .iter()
                .take(blocking)
                .contains(&head.neighbour(**d))
        })
        .count() as i64;

    toroidal_distance(head, state.food) * FOOD_DISTANCE_WEIGHT
        + escape_routes * ESCAPE_ROUTE_WEIGHT
}
