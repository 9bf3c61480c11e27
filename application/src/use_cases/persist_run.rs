//! Persist Run use case
//!
//! Stamps a finished outcome with an id and timestamp and hands it to a
//! [`RunStore`].

use crate::ports::run_store::{RunRecord, RunStore, RunStoreError};
use chrono::Utc;
use council_domain::{DeliberationOutcome, DeliberationRequest};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct PersistRunUseCase<S: RunStore + ?Sized> {
    store: Arc<S>,
}

impl<S: RunStore + ?Sized> PersistRunUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Build the record for `outcome` and save it.
    ///
    /// No-content outcomes are stored too, so a failed run can still be
    /// inspected later.
    pub async fn execute(
        &self,
        request: &DeliberationRequest,
        outcome: DeliberationOutcome,
    ) -> Result<RunRecord, RunStoreError> {
        let record = RunRecord {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            title: request.title(),
            request: request.clone(),
            outcome,
        };
        self.store.save(&record).await?;
        info!("Saved run {} ({})", record.id, record.title);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use council_domain::{Model, NoContentReport};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<Vec<RunRecord>>,
    }

    #[async_trait]
    impl RunStore for MemoryStore {
        async fn save(&self, record: &RunRecord) -> Result<(), RunStoreError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn load(&self, id: &str) -> Result<RunRecord, RunStoreError> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| RunStoreError::NotFound(id.to_string()))
        }

        async fn list(&self) -> Result<Vec<crate::ports::run_store::RunSummary>, RunStoreError> {
            Ok(self.records.lock().unwrap().iter().rev().map(RunRecord::summary).collect())
        }
    }

    #[tokio::test]
    async fn test_persists_no_content_outcome_with_fresh_id() {
        let store = Arc::new(MemoryStore::default());
        let uc = PersistRunUseCase::new(Arc::clone(&store));
        let request = DeliberationRequest::new("truth", "Senior Rust Engineer\nRemote").unwrap();
        let outcome = DeliberationOutcome::NoContent(NoContentReport::new(vec![Model::Gpt51]));

        let first = uc.execute(&request, outcome.clone()).await.unwrap();
        let second = uc.execute(&request, outcome).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_eq!(first.title, "Senior Rust Engineer Remote");

        let loaded = store.load(&first.id).await.unwrap();
        assert_eq!(loaded, first);
        let summary = loaded.summary();
        assert!(!summary.completed);
        assert!(summary.final_model.is_none());
    }
}
