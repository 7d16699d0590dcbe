//! Leaderboard query over accepted records

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::submission::ScoreRecord;
use crate::types::GameId;

/// Default window for `Recent` queries
pub const RECENT_WINDOW_MS: u64 = 7 * 24 * 60 * 60 * 1000;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardMode {
    /// Sum of reward points per user
    Total,
    /// Best score per user
    PerGame,
    /// Best score per user within the recent window
    Recent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub mode: LeaderboardMode,
    pub game: Option<String>,
    pub limit: usize,
    #[serde(default = "default_window")]
    pub window_ms: u64,
}

fn default_window() -> u64 {
    RECENT_WINDOW_MS
}

impl LeaderboardQuery {
    pub fn total(limit: usize) -> Self {
        Self {
            mode: LeaderboardMode::Total,
            game: None,
            limit,
            window_ms: RECENT_WINDOW_MS,
        }
    }

    pub fn per_game(game: GameId, limit: usize) -> Self {
        Self {
            mode: LeaderboardMode::PerGame,
            game: Some(game.as_str().to_string()),
            limit,
            window_ms: RECENT_WINDOW_MS,
        }
    }

    pub fn recent(limit: usize) -> Self {
        Self {
            mode: LeaderboardMode::Recent,
            game: None,
            limit,
            window_ms: RECENT_WINDOW_MS,
        }
    }

    pub fn for_game(mut self, game: GameId) -> Self {
        self.game = Some(game.as_str().to_string());
        self
    }
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self::total(DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user: String,
    pub value: i64,
}

/// Rank users for `query` as of `now_ms`.
///
/// Higher values rank first; ties are ordered by user name. Ranks are 1-based
/// and consecutive.
pub fn rank<'a>(
    records: impl IntoIterator<Item = &'a ScoreRecord>,
    query: &LeaderboardQuery,
    now_ms: u64,
) -> Vec<LeaderboardEntry> {
    let cutoff = now_ms.saturating_sub(query.window_ms);
    let mut values: HashMap<&str, i64> = HashMap::new();

    for record in records {
        if let Some(game) = &query.game {
            if record.game != *game {
                continue;
            }
        }

        match query.mode {
            LeaderboardMode::Total => {
                *values.entry(record.user.as_str()).or_insert(0) += record.points_earned;
            }
            LeaderboardMode::Recent if record.timestamp < cutoff => {}
            LeaderboardMode::PerGame | LeaderboardMode::Recent => {
                let best = values.entry(record.user.as_str()).or_insert(record.score);
                *best = (*best).max(record.score);
            }
        }
    }

    let mut sorted: Vec<(&str, i64)> = values.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    sorted
        .into_iter()
        .take(query.limit)
        .enumerate()
        .map(|(i, (user, value))| LeaderboardEntry {
            rank: i + 1,
            user: user.to_string(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(user: &str, game: &str, score: i64, timestamp: u64) -> ScoreRecord {
        ScoreRecord {
            user: user.to_string(),
            game: game.to_string(),
            score,
            points_earned: score / 10,
            timestamp,
        }
    }

    fn sample() -> Vec<ScoreRecord> {
        vec![
            rec("ada", "snake", 300, 1_000),
            rec("ada", "tetris", 900, 2_000),
            rec("bob", "snake", 500, 3_000),
            rec("cy", "tetris", 1200, RECENT_WINDOW_MS + 5_000),
        ]
    }

    #[test]
    fn test_total_sums_points() {
        let board = rank(&sample(), &LeaderboardQuery::total(10), 0);
        assert_eq!(board[0].user, "ada");
        assert_eq!(board[0].value, 120);
        assert_eq!(board[1].user, "cy");
        assert_eq!(board[2].value, 50);
        assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_per_game_takes_best_score() {
        let board = rank(&sample(), &LeaderboardQuery::per_game(GameId::Snake, 10), 0);
        assert_eq!(
            board,
            vec![
                LeaderboardEntry {
                    rank: 1,
                    user: "bob".into(),
                    value: 500,
                },
                LeaderboardEntry {
                    rank: 2,
                    user: "ada".into(),
                    value: 300,
                },
            ]
        );
    }

    #[test]
    fn test_recent_drops_old_records() {
        let now = RECENT_WINDOW_MS + 6_000;
        let board = rank(&sample(), &LeaderboardQuery::recent(10), now);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].user, "cy");
    }

    #[test]
    fn test_ties_break_by_name_and_limit_applies() {
        let records = vec![
            rec("zed", "snake", 100, 0),
            rec("amy", "snake", 100, 0),
            rec("max", "snake", 50, 0),
        ];
        let board = rank(&records, &LeaderboardQuery::per_game(GameId::Snake, 2), 0);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].user, "amy");
        assert_eq!(board[1].user, "zed");
    }
}
