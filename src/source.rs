// src/source.rs
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use crate::listing::Listing;

/// Makes the upstream dataset available locally. The pipeline only calls
/// `refresh`; how the bytes arrive is this collaborator's business.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

/// Clones the listings repository on first run, fast-forwards it afterwards.
pub struct GitFetcher {
    repo_url: String,
    local_path: PathBuf,
}

impl GitFetcher {
    pub fn new(repo_url: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_url: repo_url.into(),
            local_path: local_path.into(),
        }
    }

    async fn run_git(args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .output()
            .await
            .context("spawn git")?;
        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

#[async_trait]
impl SourceFetcher for GitFetcher {
    async fn refresh(&self) -> Result<()> {
        let path = self.local_path.to_string_lossy().to_string();
        if self.local_path.join(".git").is_dir() {
            tracing::info!(path = %path, "updating listings repository");
            Self::run_git(&["-C", &path, "pull", "--ff-only"]).await
        } else {
            tracing::info!(url = %self.repo_url, "cloning listings repository");
            Self::run_git(&["clone", "--depth", "1", &self.repo_url, &path]).await
        }
    }
}

/// Loads the listings dataset out of the materialized repo. An absent or
/// unparsable file aborts the run; the previous snapshot stays untouched.
pub async fn load_listings(path: &Path) -> Result<Vec<Listing>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read listings dataset {}", path.display()))?;
    let listings: Vec<Listing> = serde_json::from_str(&raw)
        .with_context(|| format!("parse listings dataset {}", path.display()))?;
    tracing::info!(count = listings.len(), "listings dataset loaded");
    Ok(listings)
}
