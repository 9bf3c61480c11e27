//! One pretty-printed JSON file per run.
//!
//! Records live at `<dir>/<run-id>.json`. The directory is created on the
//! first save.

use async_trait::async_trait;
use council_application::{RunRecord, RunStore, RunStoreError, RunSummary};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-system [`RunStore`]
#[derive(Debug, Clone)]
pub struct JsonFileRunStore {
    dir: PathBuf,
}

impl JsonFileRunStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/draft-council/runs`, falling back to `./data/runs`
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("draft-council").join("runs"))
            .unwrap_or_else(|| PathBuf::from("data").join("runs"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Ids are generated UUIDs; anything that could escape the directory is refused.
    fn is_safe_id(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

#[async_trait]
impl RunStore for JsonFileRunStore {
    async fn save(&self, record: &RunRecord) -> Result<(), RunStoreError> {
        if !Self::is_safe_id(&record.id) {
            return Err(RunStoreError::InvalidId(record.id.clone()));
        }
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(record)?;
        let path = self.record_path(&record.id);
        tokio::fs::write(&path, json).await?;
        debug!("Wrote run record {}", path.display());
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<RunRecord, RunStoreError> {
        if !Self::is_safe_id(id) {
            return Err(RunStoreError::InvalidId(id.to_string()));
        }
        let path = self.record_path(id);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RunStoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    async fn list(&self) -> Result<Vec<RunSummary>, RunStoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = tokio::fs::read_to_string(&path)
                .await
                .map_err(RunStoreError::from)
                .and_then(|json| {
                    serde_json::from_str::<RunRecord>(&json).map_err(RunStoreError::from)
                });
            match parsed {
                Ok(record) => summaries.push(record.summary()),
                Err(e) => warn!("Skipping unreadable run file {}: {}", path.display(), e),
            }
        }

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }
}
