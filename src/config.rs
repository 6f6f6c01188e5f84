// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_REPO_URL: &str = "https://github.com/cvrve/Summer2025-Internships";
pub const DEFAULT_LOCAL_REPO_PATH: &str = "Summer2025-Internships";
pub const DEFAULT_SNAPSHOT_PATH: &str = "previous_data.json";
const DEFAULT_SEND_DELAY_SECS: u64 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Process configuration, read once at startup from the environment
/// (`.env` is loaded first by the binary).
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub channel_ids: Vec<String>,
    pub repo_url: String,
    pub local_repo_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub send_delay: Duration,
}

impl Config {
    /// `DISCORD_TOKEN` and a non-empty `CHANNEL_IDS` list are mandatory;
    /// everything else has the upstream defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = require("DISCORD_TOKEN")?;
        let channel_ids: Vec<String> = require("CHANNEL_IDS")?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if channel_ids.is_empty() {
            return Err(ConfigError::Missing("CHANNEL_IDS"));
        }

        let send_delay_secs: u64 = std::env::var("SEND_DELAY_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SEND_DELAY_SECS);

        Ok(Self {
            token,
            channel_ids,
            repo_url: var_or("REPO_URL", DEFAULT_REPO_URL),
            local_repo_path: PathBuf::from(var_or("LOCAL_REPO_PATH", DEFAULT_LOCAL_REPO_PATH)),
            snapshot_path: PathBuf::from(var_or("SNAPSHOT_PATH", DEFAULT_SNAPSHOT_PATH)),
            send_delay: Duration::from_secs(send_delay_secs),
        })
    }

    /// Where the dataset lives inside the materialized repo.
    pub fn listings_path(&self) -> PathBuf {
        self.local_repo_path
            .join(".github")
            .join("scripts")
            .join("listings.json")
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
