//! Model fan-out dispatcher
//!
//! Sends the same messages to several models at once. Every model gets its
//! own task and its own timeout; whatever goes wrong for one model is
//! recorded as an absent result and never fails the batch.

use crate::ports::model_endpoint::{GenerationParams, ModelEndpoint};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use council_domain::{Message, Model, Stage};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Concurrent, single-attempt model invocation
pub struct FanOutDispatcher<E: ModelEndpoint + 'static> {
    endpoint: Arc<E>,
}

impl<E: ModelEndpoint + 'static> Clone for FanOutDispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            endpoint: Arc::clone(&self.endpoint),
        }
    }
}

impl<E: ModelEndpoint + 'static> FanOutDispatcher<E> {
    pub fn new(endpoint: Arc<E>) -> Self {
        Self { endpoint }
    }

    /// Query every model without progress reporting.
    pub async fn query_many(
        &self,
        models: &[Model],
        messages: &[Message],
        params: &GenerationParams,
    ) -> Vec<(Model, Option<String>)> {
        self.query_many_with_progress(models, messages, params, Stage::Draft, &NoProgress)
            .await
    }

    /// Query every model concurrently.
    ///
    /// Results come back in request order. A model whose call errored, timed
    /// out, panicked or returned only whitespace maps to `None`. Each
    /// resolved call is reported to `progress` under `stage` as it lands.
    pub async fn query_many_with_progress(
        &self,
        models: &[Model],
        messages: &[Message],
        params: &GenerationParams,
        stage: Stage,
        progress: &dyn ProgressNotifier,
    ) -> Vec<(Model, Option<String>)> {
        let shared: Arc<[Message]> = Arc::from(messages);
        let mut join_set = JoinSet::new();

        for (idx, model) in models.iter().enumerate() {
            let endpoint = Arc::clone(&self.endpoint);
            let messages = Arc::clone(&shared);
            let model = model.clone();
            let params = *params;

            join_set.spawn(async move {
                let result =
                    tokio::time::timeout(params.timeout, endpoint.invoke(&model, &messages, &params))
                        .await;
                (idx, model, result)
            });
        }

        let mut slots: Vec<Option<String>> = vec![None; models.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, model, Ok(Ok(text)))) => {
                    let text = text.trim();
                    if text.is_empty() {
                        warn!("Model {} returned empty text during {}", model, stage);
                        progress.on_task_complete(&stage, &model, false);
                    } else {
                        debug!("Model {} responded ({} chars)", model, text.len());
                        progress.on_task_complete(&stage, &model, true);
                        slots[idx] = Some(text.to_string());
                    }
                }
                Ok((_, model, Ok(Err(e)))) => {
                    warn!("Model {} failed during {}: {}", model, stage, e);
                    progress.on_task_complete(&stage, &model, false);
                }
                Ok((_, model, Err(_))) => {
                    warn!(
                        "Model {} timed out after {:?} during {}",
                        model, params.timeout, stage
                    );
                    progress.on_task_complete(&stage, &model, false);
                }
                Err(e) => {
                    warn!("Task join error during {}: {}", stage, e);
                }
            }
        }

        models.iter().cloned().zip(slots).collect()
    }

    /// Query one model; same contract as [`Self::query_many_with_progress`].
    pub async fn query_one(
        &self,
        model: &Model,
        messages: &[Message],
        params: &GenerationParams,
        stage: Stage,
        progress: &dyn ProgressNotifier,
    ) -> Option<String> {
        self.query_many_with_progress(
            std::slice::from_ref(model),
            messages,
            params,
            stage,
            progress,
        )
        .await
        .into_iter()
        .next()
        .and_then(|(_, text)| text)
    }
}
