//! Submission types and validation
//!
//! A submission is `{user, game, score}`. The collaborator accepts it only if
//! the game is one of the fixed set and the score lies in
//! `MIN_SUBMITTED_SCORE..=MAX_SUBMITTED_SCORE`. Rejections are structured so
//! they can be returned over a wire as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{GameId, MAX_SUBMITTED_SCORE, MIN_SUBMITTED_SCORE, POINTS_PER_SCORE_DIVISOR};

/// Score submission request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub user: String,
    pub game: String,
    pub score: i64,
}

impl ScoreSubmission {
    pub fn new(user: impl Into<String>, game: GameId, score: i64) -> Self {
        Self {
            user: user.into(),
            game: game.as_str().to_string(),
            score,
        }
    }

    /// Check the request and return the parsed game id
    pub fn validate(&self) -> Result<GameId, SubmissionError> {
        if self.user.trim().is_empty() {
            return Err(SubmissionError::MissingUser);
        }

        let game = GameId::from_str(&self.game).ok_or_else(|| SubmissionError::UnknownGame {
            game: self.game.clone(),
        })?;

        if !(MIN_SUBMITTED_SCORE..=MAX_SUBMITTED_SCORE).contains(&self.score) {
            return Err(SubmissionError::ScoreOutOfRange {
                score: self.score,
                min: MIN_SUBMITTED_SCORE,
                max: MAX_SUBMITTED_SCORE,
            });
        }

        Ok(game)
    }
}

/// Reward points for an accepted score: `floor(score / 10)`
pub fn points_earned(score: i64) -> i64 {
    score.div_euclid(POINTS_PER_SCORE_DIVISOR)
}

/// Structured rejection of a submission
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum SubmissionError {
    #[error("missing user")]
    MissingUser,

    #[error("unknown game `{game}`")]
    UnknownGame { game: String },

    #[error("score {score} outside {min}..={max}")]
    ScoreOutOfRange { score: i64, min: i64, max: i64 },
}

impl SubmissionError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::MissingUser => "missing_user",
            SubmissionError::UnknownGame { .. } => "unknown_game",
            SubmissionError::ScoreOutOfRange { .. } => "score_out_of_range",
        }
    }
}

/// Persisted record of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user: String,
    pub game: String,
    pub score: i64,
    pub points_earned: i64,
    /// Unix time in milliseconds
    pub timestamp: u64,
}

impl ScoreRecord {
    pub fn accepted(submission: ScoreSubmission, timestamp: u64) -> Self {
        let points_earned = points_earned(submission.score);
        Self {
            user: submission.user,
            game: submission.game,
            score: submission.score,
            points_earned,
            timestamp,
        }
    }
}
