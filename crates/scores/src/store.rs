//! Score persistence - JSON-lines file with an in-memory fallback
//!
//! With a path configured, every accepted record is appended as one JSON line
//! and existing lines are loaded on open. Without a path, when the file cannot
//! be loaded, or when an append fails, the record goes to an append-only
//! in-process list instead; those records are lost on restart but still count
//! for leaderboard queries.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::submission::ScoreRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed score record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a record ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Durable,
    Fallback,
}

#[derive(Debug, Default)]
pub struct ScoreStore {
    path: Option<PathBuf>,
    durable: Vec<ScoreRecord>,
    fallback: Vec<ScoreRecord>,
}

impl ScoreStore {
    /// In-memory only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a JSON-lines file, loading any records already in it.
    /// A missing file is treated as empty and created on first append.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let durable = load_records(&path).await?;
        Ok(Self {
            path: Some(path),
            durable,
            fallback: Vec::new(),
        })
    }

    /// Like [`ScoreStore::open`], but an unreadable or malformed file leaves
    /// the store memory-only instead of failing. The file is not touched.
    pub async fn open_or_in_memory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path).await {
            Ok(store) => store,
            Err(e) => {
                log::warn!(
                    "[Scores] cannot load {}, keeping scores in memory: {}",
                    path.display(),
                    e
                );
                Self::in_memory()
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append a record durably if possible, otherwise to the fallback list
    pub async fn append(&mut self, record: ScoreRecord) -> Persisted {
        let Some(path) = self.path.clone() else {
            self.fallback.push(record);
            return Persisted::Fallback;
        };

        match append_line(&path, &record).await {
            Ok(()) => {
                self.durable.push(record);
                Persisted::Durable
            }
            Err(e) => {
                log::warn!(
                    "[Scores] append to {} failed, keeping record in memory: {}",
                    path.display(),
                    e
                );
                self.fallback.push(record);
                Persisted::Fallback
            }
        }
    }

    /// All records, durable first
    pub fn records(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.durable.iter().chain(self.fallback.iter())
    }

    pub fn fallback(&self) -> &[ScoreRecord] {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.durable.len() + self.fallback.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

async fn load_records(path: &Path) -> Result<Vec<ScoreRecord>, StoreError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| StoreError::Json { line: i + 1, source })
        })
        .collect()
}

async fn append_line(path: &Path, record: &ScoreRecord) -> Result<(), StoreError> {
    let mut buf =
        serde_json::to_vec(record).map_err(|source| StoreError::Json { line: 0, source })?;
    buf.push(b'\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(&buf).await?;
    file.flush().await?;
    Ok(())
}
