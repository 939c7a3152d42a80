use std::cmp::Reverse;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Entries shown on the game-over screen.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub nickname: String,
    pub score:    i64,
}

/// Highest scores first, ties broken by nickname, cut to `limit` entries.
pub fn rank<I>(scores: I, limit: usize) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = (String, i64)>,
{
    scores
        .into_iter()
        .sorted_by(|(a_name, a_score), (b_name, b_score)| {
            (Reverse(a_score), a_name).cmp(&(Reverse(b_score), b_name))
        })
        .take(limit)
        .map(|(nickname, score)| LeaderboardEntry { nickname, score })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(n, s)| ((*n).to_owned(), *s)).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank(scores(&[("fox", 3), ("owl", 9), ("cat", 5)]), 10);
        let names: Vec<_> = ranked.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, ["owl", "cat", "fox"]);
    }

    #[test]
    fn test_ties_by_nickname() {
        let ranked = rank(scores(&[("owl", 4), ("ant", 4), ("fox", 7)]), 10);
        let names: Vec<_> = ranked.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, ["fox", "ant", "owl"]);
    }

    #[test]
    fn test_truncated() {
        let many: Vec<(String, i64)> =
            (0..25).map(|i| (format!("snake{i}"), i)).collect();
        let ranked = rank(many, LEADERBOARD_SIZE);

        assert_eq!(ranked.len(), LEADERBOARD_SIZE);
        assert_eq!(ranked[0].score, 24);
        assert_eq!(ranked[9].score, 15);
    }
}
