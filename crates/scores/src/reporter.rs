//! Fire-and-forget score reporting
//!
//! Bridges the sync game loop with an async [`ScoreSink`]. The reporter owns a
//! tokio runtime and a worker task; [`ScoreReporter::report`] only enqueues on
//! an unbounded channel, so it never blocks a tick. Failures are logged and
//! dropped. There are no retries.

use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::ScoreConfig;
use crate::leaderboard::{LeaderboardEntry, LeaderboardQuery};
use crate::service::{ScoreService, ScoreSink};
use crate::submission::ScoreSubmission;
use crate::types::GameId;

/// Message delivered to the worker
#[derive(Debug)]
enum Report {
    Submit(ScoreSubmission),
    Flush(oneshot::Sender<()>),
}

/// Outcome counts for one reporter's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub accepted: u32,
    pub rejected: u32,
}

/// Running reporter instance
pub struct ScoreReporter<S: ScoreSink = ScoreService> {
    rt: Runtime,
    tx: mpsc::UnboundedSender<Report>,
    worker: JoinHandle<ReportStats>,
    sink: Arc<S>,
    player: String,
}

impl ScoreReporter<ScoreService> {
    /// Start from environment variables.
    ///
    /// Returns None if `ARCADE_SCORES_DISABLED` is set.
    pub fn start_from_env() -> anyhow::Result<Option<Self>> {
        let config = ScoreConfig::from_env();
        if config.disabled {
            log::info!("[Scores] reporting disabled via ARCADE_SCORES_DISABLED");
            return Ok(None);
        }
        Self::from_config(&config).map(Some)
    }

    /// Start with an in-process [`ScoreService`] backed by the configured store.
    /// A store file that cannot be loaded degrades to memory-only reporting.
    pub fn from_config(config: &ScoreConfig) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime for score reporting")?;
        let service = rt.block_on(ScoreService::from_config(config));
        Ok(Self::with_runtime(rt, config.player.clone(), Arc::new(service)))
    }

    /// Query the in-process service. Waits for queued reports first.
    pub fn leaderboard(&self, query: &LeaderboardQuery) -> Vec<LeaderboardEntry> {
        self.flush();
        self.rt.block_on(self.sink.leaderboard(query))
    }
}

impl<S: ScoreSink> ScoreReporter<S> {
    /// Start a reporter that submits to `sink` as `player`
    pub fn spawn(player: impl Into<String>, sink: Arc<S>) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime for score reporting")?;
        Ok(Self::with_runtime(rt, player.into(), sink))
    }

    fn with_runtime(rt: Runtime, player: String, sink: Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Report>();
        let worker = rt.spawn(run_worker(Arc::clone(&sink), rx));
        Self {
            rt,
            tx,
            worker,
            sink,
            player,
        }
    }

    /// Hand a finished run's score to the sink. Never blocks.
    /// Returns false if the worker is gone.
    pub fn report(&self, game: GameId, score: u32) -> bool {
        let submission = ScoreSubmission::new(self.player.clone(), game, i64::from(score));
        self.tx.send(Report::Submit(submission)).is_ok()
    }

    /// Block until every report queued so far has been handled
    pub fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Report::Flush(done_tx)).is_ok() {
            let _ = self.rt.block_on(done_rx);
        }
    }

    /// Close the queue, wait for the worker to drain it, and return its counts
    pub fn shutdown(self) -> ReportStats {
        let Self { rt, tx, worker, .. } = self;
        drop(tx);
        rt.block_on(worker).unwrap_or_default()
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }
}

async fn run_worker<S: ScoreSink>(
    sink: Arc<S>,
    mut rx: mpsc::UnboundedReceiver<Report>,
) -> ReportStats {
    let mut stats = ReportStats::default();

    while let Some(msg) = rx.recv().await {
        match msg {
            Report::Submit(submission) => {
                let game = submission.game.clone();
                let score = submission.score;
                match sink.submit(submission).await {
                    Ok(record) => {
                        stats.accepted += 1;
                        log::info!(
                            "[Scores] accepted {} score {} for {} (+{} points)",
                            record.game,
                            record.score,
                            record.user,
                            record.points_earned
                        );
                    }
                    Err(e) => {
                        stats.rejected += 1;
                        log::warn!("[Scores] rejected {} score {}: {}", game, score, e);
                    }
                }
            }
            Report::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    stats
}
