use std::{fmt, ops::ControlFlow};

use log::{debug, info};
use serde::Serialize;

use super::{
    events::GameEvent,
    food::{FoodPlacer, RandomFood},
    state::{change_direction, reset, GameState},
};
use crate::{board::Direction, Error, Result};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Running,
    Over,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::NotStarted => "not started",
                Self::Running => "running",
                Self::Over => "over",
            }
        )
    }
}

/// One player's run of games: the lifecycle around [`GameState`] plus the
/// direction requested since the last tick.
pub struct Session<F = RandomFood> {
    nickname: Option<String>,
    phase:    Phase,
    state:    GameState,
    heading:  Direction,
    food:     F,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::with_food(RandomFood::new())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FoodPlacer> Session<F> {
    pub fn with_food(food: F) -> Self {
        let state = reset();
        Self {
            nickname: None,
            phase: Phase::NotStarted,
            heading: state.direction,
            state,
            food,
        }
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The direction the next tick will move in.
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Begins the first game. The nickname is expected to have been
    /// registered with the server already.
    ///
    /// # Errors
    ///
    /// Fails if the session has already started or the nickname is blank.
    pub fn start(&mut self, nickname: impl Into<String>) -> Result<()> {
        if self.phase != Phase::NotStarted {
            return Err(self.rejected("start"));
        }

        let nickname = nickname.into();
        if nickname.trim().is_empty() {
            return Err(Error::Validation("Nickname is required".to_owned()));
        }

        info!("{} is starting a game", nickname);
        self.nickname = Some(nickname);
        self.phase = Phase::Running;
        Ok(())
    }

    /// Records a direction request for the next tick. Requests that would
    /// reverse the last move are ignored. Returns the heading now in effect.
    pub fn steer(&mut self, requested: Direction) -> Direction {
        if self.phase == Phase::Running
            && change_direction(self.state.direction, requested) == requested
        {
            self.heading = requested;
        }
        self.heading
    }

    /// Advances a running game by one step. Does nothing in any other phase.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.phase != Phase::Running {
            return vec![];
        }

        let (state, events) = self.state.step(self.heading, &mut self.food);
        self.state = state;

        for event in &events {
            debug!("{:?}", event);
        }

        if self.state.is_over {
            info!(
                "game over for {} with a score of {}",
                self.nickname.as_deref().unwrap_or("nobody"),
                self.state.score
            );
            self.phase = Phase::Over;
        }

        events
    }

    /// One beat of the game loop for a [`Ticker`](super::Ticker): ticks,
    /// hands each event to `on_event`, and breaks once the game is no longer
    /// running so the ticker stops.
    pub fn advance<E>(&mut self, mut on_event: E) -> ControlFlow<()>
    where
        E: FnMut(&GameEvent),
    {
        for event in &self.tick() {
            on_event(event);
        }

        if self.phase == Phase::Running {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }

    /// Starts a fresh game after the previous one ended.
    ///
    /// # Errors
    ///
    /// Fails unless the current game is over.
    pub fn reset(&mut self) -> Result<()> {
        if self.phase != Phase::Over {
            return Err(self.rejected("reset"));
        }

        self.state = reset();
        self.heading = self.state.direction;
        self.phase = Phase::Running;
        Ok(())
    }

    fn rejected(&self, action: &str) -> Error {
        Error::Session(format!("cannot {action} a game that is {}", self.phase))
    }
}
