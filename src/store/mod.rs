pub mod leaderboard;
pub mod memory;
pub mod nicknames;
pub mod scores;

pub use leaderboard::{rank, LeaderboardEntry, LEADERBOARD_SIZE};
pub use memory::MemoryStore;
pub use nicknames::NicknameRegistry;
pub use scores::ScoreStore;

/// Storage capability the registries are built on. Implement it over a
/// database to make nicknames and scores outlive the process.
pub trait KeyValueStore<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;

    fn set(&self, key: &str, value: V);

    fn entries(&self) -> Vec<(String, V)>;
}
