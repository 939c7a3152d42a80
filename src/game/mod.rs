pub mod autopilot;
pub mod events;
pub mod food;
pub mod session;
pub mod state;
pub mod ticker;

pub use events::{EndCause, GameEvent};
pub use food::{FoodPlacer, RandomFood};
pub use session::{Phase, Session};
pub use state::{change_direction, reset, Cell, GameState};
pub use ticker::Ticker;
