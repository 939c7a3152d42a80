use serde::Serialize;

use crate::board::Position;

/// Signals emitted by a step for the presentation layer to react to. The
/// core attaches no timing to them.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    FoodEaten { at: Position, score: u64 },
    GameOver { score: u64, cause: EndCause },
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndCause {
    SelfCollision,
    /// The snake covers every cell, so there is nowhere to put food.
    BoardFull,
}

impl GameEvent {
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::GameOver {
            score: 7,
            cause: EndCause::SelfCollision,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"game_over\""));
        assert!(json.contains("\"cause\":\"self_collision\""));
        assert!(event.is_game_over());
    }
}
