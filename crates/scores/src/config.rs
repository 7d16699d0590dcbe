//! Score boundary configuration from environment variables
//!
//! - `ARCADE_PLAYER`: user name attached to submissions (default: "guest")
//! - `ARCADE_SCORES_PATH`: JSON-lines file for accepted records (default: memory only)
//! - `ARCADE_SCORES_DISABLED`: set to "1" or "true" to disable reporting

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PLAYER: &str = "guest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreConfig {
    pub player: String,
    pub store_path: Option<PathBuf>,
    pub disabled: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            player: DEFAULT_PLAYER.to_string(),
            store_path: None,
            disabled: false,
        }
    }
}

impl ScoreConfig {
    pub fn from_env() -> Self {
        let player = env::var("ARCADE_PLAYER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER.to_string());

        let store_path = env::var("ARCADE_SCORES_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            player,
            store_path,
            disabled: Self::is_disabled(),
        }
    }

    /// Check if reporting is disabled via environment
    pub fn is_disabled() -> bool {
        env::var("ARCADE_SCORES_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }
}
