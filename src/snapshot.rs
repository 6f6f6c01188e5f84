// src/snapshot.rs
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::listing::Listing;

/// Reads and rewrites the previous-run snapshot. One flat JSON file,
/// replaced wholesale at the end of every run; no history.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file means first run: empty snapshot. A corrupt file is an
    /// error; pretending it is empty would re-announce the whole dataset.
    pub async fn load(&self) -> Result<Vec<Listing>> {
        match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s)
                .with_context(|| format!("parse snapshot {}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => {
                Err(e).with_context(|| format!("read snapshot {}", self.path.display()))
            }
        }
    }

    pub async fn save(&self, listings: &[Listing]) -> Result<()> {
        let body = serde_json::to_vec(listings).context("serialize snapshot")?;
        fs::write(&self.path, body)
            .await
            .with_context(|| format!("write snapshot {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
