pub mod types;
pub mod utils;

pub use types::{Direction, Position};

/// Cells per side of the square playing field.
pub const GRID_SIZE: i64 = 20;
