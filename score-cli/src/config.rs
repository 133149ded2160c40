//! Configuration and persisted state for the scoreboard console.
//!
//! Node configuration is loaded from a TOML file (default:
//! `<data-dir>/scoreboard.toml`). A missing file means all defaults.
//! The match itself lives in `<data-dir>/match.json`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use score_core::{LinkState, MatchState, ReplicaConfig};
use score_types::NodeRole;

/// Root configuration for the console.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Which end of the link this unit is.
    #[serde(default)]
    pub node: NodeConfig,
    /// Retransmission tuning.
    #[serde(default)]
    pub link: LinkConfig,
}

/// Node identity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    /// `primary` or `secondary` (default: primary).
    #[serde(default)]
    pub role: NodeRole,
}

/// Retransmission tuning for score frames.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    /// First retry delay in milliseconds (default: 250).
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,
    /// Retry delay cap in milliseconds (default: 4000).
    #[serde(default = "default_retry_max_ms")]
    pub retry_max_ms: u64,
    /// Random jitter added to each retry in milliseconds (default: 50).
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
    /// Transmissions before the peer is reported unreachable (default: 8).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

// Default value functions
fn default_retry_base_ms() -> u64 {
    250
}

fn default_retry_max_ms() -> u64 {
    4000
}

fn default_jitter_ms() -> u64 {
    50
}

fn default_max_attempts() -> u32 {
    8
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            retry_base_ms: default_retry_base_ms(),
            retry_max_ms: default_retry_max_ms(),
            jitter_ms: default_jitter_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl LinkConfig {
    /// Convert to the replica's tuning.
    pub fn replica_config(&self) -> ReplicaConfig {
        ReplicaConfig {
            retry_base: Duration::from_millis(self.retry_base_ms),
            retry_max: Duration::from_millis(self.retry_max_ms),
            jitter_ms: self.jitter_ms,
            max_attempts: self.max_attempts.max(1),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load configuration, falling back to defaults if the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

/// The match record stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchFile {
    /// Last frame sequence sent or adopted.
    #[serde(default)]
    pub sequence: u32,
    /// Current score.
    pub state: MatchState,
    /// Link status when the record was written.
    #[serde(default)]
    pub link: LinkState,
}

impl MatchFile {
    const FILE_NAME: &'static str = "match.json";

    /// Wrap a fresh state.
    pub fn new(state: MatchState) -> Self {
        Self {
            sequence: 0,
            state,
            link: LinkState::Idle,
        }
    }

    /// Load the match record from a directory.
    pub async fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(Self::FILE_NAME);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .context("No match in progress. Run 'scoreboard new' first.")?;
        serde_json::from_str(&contents).context("Invalid match file")
    }

    /// Save the match record to a directory.
    pub async fn save(&self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join(Self::FILE_NAME);
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, contents)
            .await
            .context("Failed to save match file")?;
        Ok(())
    }

    /// Check if a match record exists.
    pub async fn exists(data_dir: &Path) -> bool {
        tokio::fs::try_exists(data_dir.join(Self::FILE_NAME))
            .await
            .unwrap_or(false)
    }
}
