//! In-process score collaborator: validates, persists and answers queries

use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;

use crate::config::ScoreConfig;
use crate::leaderboard::{rank, LeaderboardEntry, LeaderboardQuery};
use crate::store::{Persisted, ScoreStore};
use crate::submission::{ScoreRecord, ScoreSubmission, SubmissionError};

/// Anything that accepts score submissions asynchronously
pub trait ScoreSink: Send + Sync + 'static {
    fn submit(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<ScoreRecord, SubmissionError>> + Send;
}

pub struct ScoreService {
    store: RwLock<ScoreStore>,
}

impl ScoreService {
    pub fn new(store: ScoreStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(ScoreStore::in_memory())
    }

    /// Open the configured store. No path, or a file that cannot be loaded,
    /// leaves the service memory-only.
    pub async fn from_config(config: &ScoreConfig) -> Self {
        let store = match &config.store_path {
            Some(path) => ScoreStore::open_or_in_memory(path).await,
            None => ScoreStore::in_memory(),
        };
        Self::new(store)
    }

    /// Validate and persist a submission stamped with the current time
    pub async fn record(
        &self,
        submission: ScoreSubmission,
    ) -> Result<ScoreRecord, SubmissionError> {
        self.record_at(submission, current_timestamp_ms()).await
    }

    pub async fn record_at(
        &self,
        mut submission: ScoreSubmission,
        timestamp: u64,
    ) -> Result<ScoreRecord, SubmissionError> {
        let game = submission.validate()?;
        submission.game = game.as_str().to_string();
        let record = ScoreRecord::accepted(submission, timestamp);

        let mut store = self.store.write().await;
        if store.append(record.clone()).await == Persisted::Fallback {
            log::debug!("[Scores] kept {} record in memory", record.game);
        }
        Ok(record)
    }

    pub async fn leaderboard(&self, query: &LeaderboardQuery) -> Vec<LeaderboardEntry> {
        self.leaderboard_at(query, current_timestamp_ms()).await
    }

    pub async fn leaderboard_at(
        &self,
        query: &LeaderboardQuery,
        now_ms: u64,
    ) -> Vec<LeaderboardEntry> {
        let store = self.store.read().await;
        rank(store.records(), query, now_ms)
    }

    pub async fn records(&self) -> Vec<ScoreRecord> {
        self.store.read().await.records().cloned().collect()
    }
}

impl ScoreSink for ScoreService {
    fn submit(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<ScoreRecord, SubmissionError>> + Send {
        self.record(submission)
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
