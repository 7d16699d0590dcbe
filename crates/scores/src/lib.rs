//! Score boundary - submission, persistence, leaderboard, reporting
//!
//! The game engines never talk to this crate directly. When a run ends (or the
//! player saves), the session hands `{game, score}` to a [`ScoreReporter`],
//! which forwards it to a [`ScoreSink`] on a background runtime.
//!
//! # Submission rules
//!
//! - `game` must be one of `snake`, `tetris`, `memory`, `trivia`
//! - `score` must satisfy `5 <= score <= 50000`
//! - accepted scores earn `floor(score / 10)` reward points
//!
//! Rejections come back as a structured [`SubmissionError`] with a stable
//! `code` field when serialized.
//!
//! # Persistence
//!
//! [`ScoreStore`] appends one JSON object per line to `ARCADE_SCORES_PATH`.
//! Without a path, or if an append fails, records are kept in an in-process
//! append-only list that is lost on restart.
//!
//! # Environment Variables
//!
//! - `ARCADE_PLAYER`: user name for submissions (default: "guest")
//! - `ARCADE_SCORES_PATH`: JSON-lines file for accepted records
//! - `ARCADE_SCORES_DISABLED`: set to "1" or "true" to disable reporting

pub mod config;
pub mod leaderboard;
pub mod reporter;
pub mod service;
pub mod store;
pub mod submission;

pub use arcade_types as types;

pub use config::ScoreConfig;
pub use leaderboard::{rank, LeaderboardEntry, LeaderboardMode, LeaderboardQuery, RECENT_WINDOW_MS};
pub use reporter::{ReportStats, ScoreReporter};
pub use service::{current_timestamp_ms, ScoreService, ScoreSink};
pub use store::{Persisted, ScoreStore, StoreError};
pub use submission::{points_earned, ScoreRecord, ScoreSubmission, SubmissionError};
