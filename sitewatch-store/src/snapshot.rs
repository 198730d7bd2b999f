use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use sitewatch_core::models::{Session, Site, Status};

/// Exported dashboard state the in-memory API serves from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Signed-in user; `None` simulates a signed-out browser.
    #[serde(default)]
    pub session: Option<Session>,
    /// Current password, checked by password changes.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub sites: Vec<SiteRecord>,
}

/// A site together with its check history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(flatten)]
    pub site: Site,
    #[serde(default)]
    pub statuses: Vec<Status>,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("invalid snapshot json")
    }

    /// Read a snapshot file.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::from_json(&raw)
    }
}
