use std::{
    fmt::Write,
    time::{Duration, Instant},
};

use rand::Rng;

use crate::{
    board::{Position, GRID_SIZE},
    game::{Cell, GameEvent, GameState},
};

/// How long the body keeps cycling colours after a meal.
pub const RAINBOW_DURATION: Duration = Duration::from_millis(3000);

// capitals so no stripe matches the plain 'o' body
const RAINBOW: [char; 7] = ['R', 'O', 'Y', 'G', 'B', 'I', 'V'];

/// Food glyphs. A new one is picked for every placement after a meal and the
/// first is used again when a game starts.
pub const FRUIT: [char; 6] = ['*', '%', '&', '$', '+', '#'];

/// Text presentation of a game. Effects are triggered by [`GameEvent`]s and
/// timed against the instants the caller passes in, independently of ticks.
#[derive(Debug, Default)]
pub struct Screen {
    rainbow_until: Option<Instant>,
    final_score:   Option<u64>,
    fruit:         usize,
}

impl Screen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &GameEvent, now: Instant) {
        match event {
            GameEvent::FoodEaten { .. } => {
                self.rainbow_until = Some(now + RAINBOW_DURATION);
                self.fruit = rand::thread_rng().gen_range(0..FRUIT.len());
            }
            GameEvent::GameOver { score, .. } => {
                self.final_score = Some(*score);
            }
        }
    }

    /// Forgets every effect, for when a new game starts.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_rainbow(&self, now: Instant) -> bool {
        self.rainbow_until.is_some_and(|until| now < until)
    }

    #[must_use]
    pub const fn fruit(&self) -> char {
        FRUIT[self.fruit]
    }

    #[must_use]
    pub fn draw(&self, state: &GameState, nickname: &str, now: Instant) -> String {
        let rainbow = self.is_rainbow(now);
        let mut out = String::new();

        // writing to a String can't fail
        let _ = writeln!(out, "{nickname}  score: {}", state.score);
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                out.push(match state.cell(Position::new(x, y)) {
                    Cell::Head => '@',
                    Cell::Body(index) if rainbow => {
                        RAINBOW[index % RAINBOW.len()]
                    }
                    Cell::Body(_) => 'o',
                    Cell::Food => self.fruit(),
                    Cell::Empty => '.',
                });
            }
            out.push('\n');
        }

        if let Some(score) = self.final_score {
            let _ = writeln!(out, "*** GAME OVER *** your score: {score}");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::*;
    use rand::Rng;

use crate::{board::Direction, game::EndCause};

    fn game() -> GameState {
        GameState::new(
            VecDeque::from([
                Position::new(2, 0),
                Position::new(1, 0),
                Position::new(0, 0),
            ]),
            Direction::Right,
            Position::new(4, 0),
        )
    }

    fn grid_row(frame: &str, row: usize) -> &str {
        frame.lines().nth(row + 1).unwrap()
    }

    #[test]
    fn test_plain_frame() {
        let screen = Screen::new();
        let frame = screen.draw(&game(), "fox", Instant::now());

        assert!(frame.starts_with("fox  score: 0"));
        assert!(grid_row(&frame, 0).starts_with("oo@.*"));
        assert!(!frame.contains("GAME OVER"));
    }

    #[test]
    fn test_rainbow_expires() {
        let start = Instant::now();
        let mut screen = Screen::new();
        screen.apply(
            &GameEvent::FoodEaten {
                at:    Position::new(2, 0),
                score: 1,
            },
            start,
        );

        let during = screen.draw(&game(), "fox", start);
        assert!(grid_row(&during, 0).starts_with("YO@"));

        let after = start + RAINBOW_DURATION;
        assert!(!screen.is_rainbow(after));
        assert!(grid_row(&screen.draw(&game(), "fox", after), 0)
            .starts_with("oo@"));
    }

    #[test]
    fn test_fruit_changes_with_meals() {
        let now = Instant::now();
        let mut screen = Screen::new();
        assert_eq!(screen.fruit(), '*');

        let meal = GameEvent::FoodEaten {
            at:    Position::new(2, 0),
            score: 1,
        };
        let mut seen = HashSet::new();
        for _ in 0..100 {
            screen.apply(&meal, now);
            assert!(FRUIT.contains(&screen.fruit()));
            let frame = screen.draw(&game(), "fox", now);
            assert_eq!(grid_row(&frame, 0).chars().nth(4), Some(screen.fruit()));
            seen.insert(screen.fruit());
        }
        assert!(seen.len() > 1);

        screen.clear();
        assert_eq!(screen.fruit(), '*');
    }

    #[test]
    fn test_game_over_banner() {
        let mut screen = Screen::new();
        let now = Instant::now();
        screen.apply(
            &GameEvent::GameOver {
                score: 9,
                cause: EndCause::SelfCollision,
            },
            now,
        );
        assert!(screen.draw(&game(), "fox", now).contains("your score: 9"));

        screen.clear();
        assert!(!screen.draw(&game(), "fox", now).contains("GAME OVER"));
    }
}
