//! Run store port
//!
//! Durable storage for finished deliberation runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use council_domain::{DeliberationOutcome, DeliberationRequest, Model};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a run store
#[derive(Error, Debug)]
pub enum RunStoreError {
    #[error("Run not found: {0}")]
    NotFound(String),

    #[error("Invalid run id: {0}")]
    InvalidId(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One persisted run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// UUID v4
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub request: DeliberationRequest,
    pub outcome: DeliberationOutcome,
}

impl RunRecord {
    pub fn summary(&self) -> RunSummary {
        let run = self.outcome.run();
        RunSummary {
            id: self.id.clone(),
            created_at: self.created_at,
            title: self.title.clone(),
            completed: self.outcome.is_completed(),
            final_model: run.map(|r| r.final_artifact.model.clone()),
            refinement_applied: run.is_some_and(|r| r.metadata.refinement_applied),
        }
    }
}

/// Listing entry for a persisted run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_model: Option<Model>,
    pub refinement_applied: bool,
}

/// Store for run records
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait RunStore: Send + Sync {
    async fn save(&self, record: &RunRecord) -> Result<(), RunStoreError>;

    async fn load(&self, id: &str) -> Result<RunRecord, RunStoreError>;

    /// Summaries of every stored run, newest first.
    async fn list(&self) -> Result<Vec<RunSummary>, RunStoreError>;
}
