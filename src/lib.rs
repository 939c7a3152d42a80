#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::module_name_repetitions,
)]
pub mod api;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod store;

pub use error::{Error, Result};
