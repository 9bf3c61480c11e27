//! Run Deliberation use case
//!
//! Orchestrates the full draft, rank and finalize flow.

use crate::config::{ConfigValidationError, DeliberationConfig};
use crate::ports::model_endpoint::ModelEndpoint;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::dispatch::FanOutDispatcher;
use council_domain::{
    AggregateRanking, CandidatePack, Candidates, DeliberationOutcome, DeliberationRequest,
    DeliberationRun, DomainError, Draft, FinalArtifact, HeuristicScore, Label, LabelMap, Message,
    Model, NoContentReport, PromptContext, PromptTemplate, RankingMode, RankingResult,
    RefinementGate, RunMetadata, Stage, TargetPack, aggregate, enforce_outline, parse_ranking,
    select_best, single_judge_aggregate,
};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors a caller can see from a deliberation
///
/// Model failures are not errors: they show up as absent drafts or
/// rankings, or as [`DeliberationOutcome::NoContent`].
#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No drafting models configured")]
    NoModels,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    #[error("Deliberation cancelled")]
    Cancelled,
}

impl DeliberationError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DeliberationError::Cancelled)
    }
}

impl From<DomainError> for DeliberationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::TooManyCandidates(n) => {
                DeliberationError::InvalidConfig(ConfigValidationError::TooManyDraftingModels(n))
            }
            DomainError::DuplicateModel(model) => {
                DeliberationError::InvalidConfig(ConfigValidationError::DuplicateModel {
                    role: "drafting models",
                    model,
                })
            }
            DomainError::InvalidInput(msg) => DeliberationError::InvalidInput(msg),
        }
    }
}

/// Packs and prompt inputs shared by every stage of one run
struct RunInputs<'a> {
    request: &'a DeliberationRequest,
    truth: CandidatePack,
    target: TargetPack,
}

impl RunInputs<'_> {
    fn prompt_context<'c>(&'c self, config: &'c DeliberationConfig) -> PromptContext<'c> {
        PromptContext {
            truth_pack: self.truth.text(),
            target: &self.target,
            context_notes: self.request.context_notes(),
            style_guide: config.style_guide(),
            schema: config.schema(),
        }
    }
}

/// Output of the Rank stage
struct RankOutput {
    rankings: Vec<RankingResult>,
    aggregate: Vec<AggregateRanking>,
}

/// Use case for running a deliberation
pub struct RunDeliberationUseCase<E: ModelEndpoint + 'static> {
    dispatcher: FanOutDispatcher<E>,
    config: DeliberationConfig,
    cancellation_token: Option<CancellationToken>,
}

impl<E: ModelEndpoint + 'static> RunDeliberationUseCase<E> {
    pub fn new(endpoint: Arc<E>, config: DeliberationConfig) -> Self {
        Self {
            dispatcher: FanOutDispatcher::new(endpoint),
            config,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn config(&self) -> &DeliberationConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: &DeliberationRequest,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: &DeliberationRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        if self.config.drafting_models().is_empty() {
            return Err(DeliberationError::NoModels);
        }
        self.config.validate()?;
        self.check_cancelled()?;

        let schema = self.config.schema();
        let inputs = RunInputs {
            request,
            truth: CandidatePack::build(
                request.truth_source(),
                self.config.truth_pack_chars(),
                schema,
            ),
            target: TargetPack::build(
                request.target_description(),
                self.config.target_pack_chars(),
                self.config.max_keywords(),
            ),
        };
        debug!(
            "Packed truth source: {} chars (full: {}), {} target keywords",
            inputs.truth.char_len(),
            inputs.truth.is_full(),
            inputs.target.keywords().len()
        );

        info!(
            "Starting deliberation with {} drafting models",
            self.config.drafting_models().len()
        );

        // Stage 1: Draft
        let drafts = self.stage_draft(&inputs, progress).await?;
        if drafts.is_empty() {
            warn!("No drafting model returned usable text");
            return Ok(DeliberationOutcome::NoContent(NoContentReport::new(
                self.config.drafting_models().to_vec(),
            )));
        }

        // Stage 2: Rank
        let labels = LabelMap::from_models(drafts.iter().map(|d| d.model.clone()))?;
        let mode = request
            .ranking_mode()
            .unwrap_or_else(|| self.config.ranking_mode());
        let ranked = match mode {
            RankingMode::PeerRanking => {
                self.stage_peer_rank(&inputs, &drafts, &labels, progress)
                    .await?
            }
            RankingMode::SingleJudge => {
                self.stage_judge(&inputs, &drafts, &labels, progress)
                    .await?
            }
        };

        // Stage 3: Finalize
        let run = self
            .stage_finalize(&inputs, drafts, labels, ranked, mode, progress)
            .await?;

        info!(
            "Deliberation complete: final artifact from {} ({})",
            run.final_artifact.model, run.final_artifact.note
        );
        Ok(DeliberationOutcome::Completed(run))
    }

    fn check_cancelled(&self) -> Result<(), DeliberationError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(DeliberationError::Cancelled);
        }
        Ok(())
    }

    /// Await `fut` unless the run is cancelled first.
    ///
    /// Cancelling drops `fut`, which aborts its in-flight model calls.
    async fn guarded<T>(&self, fut: impl Future<Output = T>) -> Result<T, DeliberationError> {
        match &self.cancellation_token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(DeliberationError::Cancelled),
                out = fut => Ok(out),
            },
            None => Ok(fut.await),
        }
    }

    /// Stage 1: every drafting model writes a candidate
    async fn stage_draft(
        &self,
        inputs: &RunInputs<'_>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Draft>, DeliberationError> {
        info!("Stage 1: Draft");
        let models = self.config.drafting_models();
        progress.on_stage_start(&Stage::Draft, models.len());

        let ctx = inputs.prompt_context(&self.config);
        let messages = vec![Message::user(PromptTemplate::draft_prompt(&ctx))];
        let responses = self
            .guarded(self.dispatcher.query_many_with_progress(
                models,
                &messages,
                &self.config.params().draft,
                Stage::Draft,
                progress,
            ))
            .await?;

        let drafts: Vec<Draft> = responses
            .into_iter()
            .filter_map(|(model, text)| {
                text.map(|t| {
                    let normalized =
                        enforce_outline(&t, inputs.request.truth_source(), self.config.schema());
                    Draft::new(model, normalized)
                })
            })
            .collect();

        info!("{} of {} models produced a draft", drafts.len(), models.len());
        progress.on_stage_complete(&Stage::Draft);
        Ok(drafts)
    }

    fn labeled<'d>(drafts: &'d [Draft], labels: &LabelMap) -> Vec<(Label, &'d str)> {
        drafts
            .iter()
            .filter_map(|d| labels.label_for(&d.model).map(|l| (l, d.text.as_str())))
            .collect()
    }

    /// Stage 2, peer mode: every ranking model orders the anonymized drafts
    async fn stage_peer_rank(
        &self,
        inputs: &RunInputs<'_>,
        drafts: &[Draft],
        labels: &LabelMap,
        progress: &dyn ProgressNotifier,
    ) -> Result<RankOutput, DeliberationError> {
        info!("Stage 2: Rank (peer ranking)");
        let models = self.config.ranking_models();
        progress.on_stage_start(&Stage::Rank, models.len());

        let ctx = inputs.prompt_context(&self.config);
        let prompt = PromptTemplate::peer_ranking_prompt(&ctx, &Self::labeled(drafts, labels));
        let messages = vec![Message::user(prompt)];
        let responses = self
            .guarded(self.dispatcher.query_many_with_progress(
                models,
                &messages,
                &self.config.params().rank,
                Stage::Rank,
                progress,
            ))
            .await?;

        let rankings: Vec<RankingResult> = responses
            .into_iter()
            .filter_map(|(model, text)| text.map(|t| (model, t)))
            .map(|(model, text)| {
                let parsed = labels.normalize_ranking(&parse_ranking(&text));
                debug!("Ranking from {} parsed {} labels", model, parsed.len());
                RankingResult::new(model, text, parsed)
            })
            .collect();

        let aggregate = aggregate(
            rankings.iter().map(|r| r.parsed_labels.as_slice()),
            labels,
        );
        progress.on_stage_complete(&Stage::Rank);
        Ok(RankOutput {
            rankings,
            aggregate,
        })
    }

    /// Stage 2, judge mode: one judge orders the drafts with heuristics in view
    async fn stage_judge(
        &self,
        inputs: &RunInputs<'_>,
        drafts: &[Draft],
        labels: &LabelMap,
        progress: &dyn ProgressNotifier,
    ) -> Result<RankOutput, DeliberationError> {
        info!("Stage 2: Rank (single judge)");
        let judge = self.config.judge_model();
        progress.on_stage_start(&Stage::Rank, 1);

        let schema = self.config.schema();
        let blocks = Self::labeled(drafts, labels);
        let scores: Vec<(Label, HeuristicScore)> = blocks
            .iter()
            .map(|(label, text)| {
                (
                    *label,
                    HeuristicScore::compute(text, inputs.target.keywords(), schema),
                )
            })
            .collect();
        let score_refs: Vec<(Label, &HeuristicScore)> =
            scores.iter().map(|(l, s)| (*l, s)).collect();

        let ctx = inputs.prompt_context(&self.config);
        let messages = vec![Message::user(PromptTemplate::judge_prompt(
            &ctx,
            &blocks,
            &score_refs,
        ))];
        let response = self
            .guarded(self.dispatcher.query_one(
                judge,
                &messages,
                &self.config.params().judge,
                Stage::Rank,
                progress,
            ))
            .await?;

        let result = match response {
            Some(text) => {
                let parsed = labels.normalize_ranking(&parse_ranking(&text));
                debug!("Judge {} parsed {} labels", judge, parsed.len());
                RankingResult::new(judge.clone(), text, parsed)
            }
            None => {
                warn!("Judge {} produced no ranking", judge);
                RankingResult::empty(judge.clone())
            }
        };

        let aggregate = single_judge_aggregate(&result.parsed_labels, labels);
        progress.on_stage_complete(&Stage::Rank);
        Ok(RankOutput {
            rankings: vec![result],
            aggregate,
        })
    }

    /// Stage 3: select, normalize, gate and maybe polish
    async fn stage_finalize(
        &self,
        inputs: &RunInputs<'_>,
        drafts: Vec<Draft>,
        labels: LabelMap,
        ranked: RankOutput,
        mode: RankingMode,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationRun, DeliberationError> {
        info!("Stage 3: Finalize");
        let schema = self.config.schema();
        let truth_source = inputs.request.truth_source();
        let keywords = inputs.target.keywords();

        let candidates = Candidates {
            drafts: &drafts,
            labels: &labels,
            rankings: &ranked.rankings,
            aggregate: &ranked.aggregate,
        };
        let (selected, strategy) = select_best(&candidates).ok_or(DeliberationError::NoModels)?;
        debug!("Selected draft from {} via {}", selected.model, strategy);

        let normalized = enforce_outline(&selected.text, truth_source, schema);
        let gate = RefinementGate::new(self.config.refine_threshold());
        let decision = gate.evaluate(&selected.text, &normalized, keywords, schema);
        debug!(
            "Gate: proxy {:.3} (threshold {:.2}), reasons {:?}",
            decision.proxy,
            gate.threshold(),
            decision.reasons
        );

        let refine = decision.should_refine();
        progress.on_stage_start(&Stage::Finalize, usize::from(refine));

        let (final_artifact, refinement_applied) = if refine {
            let polish_model = self.config.polish_model();
            let ctx = inputs.prompt_context(&self.config);
            let messages = vec![Message::user(PromptTemplate::polish_prompt(&ctx, &normalized))];
            let polished = self
                .guarded(self.dispatcher.query_one(
                    polish_model,
                    &messages,
                    &self.config.params().polish,
                    Stage::Finalize,
                    progress,
                ))
                .await?;

            match polished {
                Some(text) => {
                    info!("Refinement applied by {}", polish_model);
                    let text = enforce_outline(&text, truth_source, schema);
                    (FinalArtifact::refined(polish_model.clone(), text), true)
                }
                None => {
                    warn!("Refinement by {} failed; keeping best draft", polish_model);
                    (
                        FinalArtifact::refinement_failed(selected.model.clone(), normalized),
                        false,
                    )
                }
            }
        } else {
            (FinalArtifact::selected(selected.model.clone(), normalized), false)
        };
        progress.on_stage_complete(&Stage::Finalize);

        let models_requested = self.config.drafting_models().to_vec();
        let models_responded: Vec<Model> = drafts.iter().map(|d| d.model.clone()).collect();
        let models_missing: Vec<Model> = models_requested
            .iter()
            .filter(|m| !models_responded.contains(m))
            .cloned()
            .collect();

        let metadata = RunMetadata {
            label_to_model: labels,
            aggregate_ranking: ranked.aggregate,
            models_requested,
            models_responded,
            models_missing,
            refinement_applied,
            ranking_mode: mode,
            selection_strategy: strategy,
            refinement_reasons: decision.reasons,
            score_proxy: decision.proxy,
            selected_score: decision.score,
            truth_pack_chars: inputs.truth.char_len(),
            truth_pack_full: inputs.truth.is_full(),
            target_keywords: keywords.to_vec(),
        };

        Ok(DeliberationRun {
            drafts,
            rankings: ranked.rankings,
            final_artifact,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleParams;
    use crate::ports::model_endpoint::{EndpointError, GenerationParams};
    use async_trait::async_trait;
    use council_domain::deliberation::{NOTE_REFINED, NOTE_REFINEMENT_FAILED, NOTE_SELECTED};
    use council_domain::{RefinementReason, SectionSchema, SelectionStrategy};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const TRUTH: &str = "Summary\nBackend engineer.\n\nSkills\nRust, Tokio";
    const TARGET: &str = "Rust tokio services";
    const GOOD: &str = "Summary\nBuilt rust services with tokio.\n\nSkills\nRust, Tokio";
    const WEAK: &str = "Summary\nWrote some code.\n\nSkills\nPython";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Draft,
        Peer,
        Judge,
        Polish,
    }

    impl Kind {
        fn of(prompt: &str) -> Self {
            if prompt.contains("Polish this document for the target") {
                Kind::Polish
            } else if prompt.contains("You are judging anonymized documents") {
                Kind::Judge
            } else if prompt.contains("You are ranking tailored documents") {
                Kind::Peer
            } else {
                Kind::Draft
            }
        }
    }

    #[derive(Clone)]
    enum Reply {
        Text(String),
        Hang,
    }

    /// Endpoint scripted per (prompt kind, model); unscripted calls fail
    #[derive(Default)]
    struct MockEndpoint {
        replies: HashMap<(Kind, Model), Reply>,
        calls: Mutex<Vec<(Kind, Model)>>,
    }

    impl MockEndpoint {
        fn reply(mut self, kind: Kind, model: Model, text: &str) -> Self {
            self.replies.insert((kind, model), Reply::Text(text.to_string()));
            self
        }

        fn hang(mut self, kind: Kind, model: Model) -> Self {
            self.replies.insert((kind, model), Reply::Hang);
            self
        }

        fn calls_of(&self, kind: Kind) -> Vec<Model> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    #[async_trait]
    impl ModelEndpoint for MockEndpoint {
        async fn invoke(
            &self,
            model: &Model,
            messages: &[Message],
            _params: &GenerationParams,
        ) -> Result<String, EndpointError> {
            let prompt = messages.last().map(|m| m.content.as_str()).unwrap_or_default();
            let kind = Kind::of(prompt);
            self.calls.lock().unwrap().push((kind, model.clone()));

            match self.replies.get(&(kind, model.clone())).cloned() {
                Some(Reply::Text(text)) => Ok(text),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("too late".to_string())
                }
                None => Err(EndpointError::ApiError("scripted failure".to_string())),
            }
        }
    }

    fn role_params(timeout: Duration) -> RoleParams {
        let p = GenerationParams::default().with_timeout(timeout);
        RoleParams {
            draft: p,
            rank: p,
            judge: p,
            polish: p,
        }
    }

    fn config(models: &[Model]) -> DeliberationConfig {
        DeliberationConfig::default()
            .with_drafting_models(models.to_vec())
            .with_ranking_models(models.to_vec())
            .with_schema(SectionSchema::new(["Summary", "Skills"]))
            .with_params(role_params(Duration::from_millis(200)))
    }

    fn request() -> DeliberationRequest {
        DeliberationRequest::new(TRUTH, TARGET).unwrap()
    }

    fn use_case(
        endpoint: MockEndpoint,
        config: DeliberationConfig,
    ) -> (Arc<MockEndpoint>, RunDeliberationUseCase<MockEndpoint>) {
        let endpoint = Arc::new(endpoint);
        let uc = RunDeliberationUseCase::new(Arc::clone(&endpoint), config);
        (endpoint, uc)
    }

    fn completed(outcome: DeliberationOutcome) -> DeliberationRun {
        match outcome {
            DeliberationOutcome::Completed(run) => run,
            other => panic!("expected completed run, got {other:?}"),
        }
    }

    fn label(letter: char) -> Label {
        Label::from_letter(letter).unwrap()
    }

    #[tokio::test]
    async fn test_timed_out_drafter_is_missing_and_peers_aggregate() {
        let ranking = "B is tighter.\nFINAL RANKING:\n1. Response B\n2. Response A";
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, GOOD)
            .hang(Kind::Draft, Model::Gemini3Pro)
            .reply(Kind::Draft, Model::Grok4, GOOD)
            .reply(Kind::Peer, Model::Gpt51, ranking)
            .reply(Kind::Peer, Model::Grok4, ranking);
        let models = [Model::Gpt51, Model::Gemini3Pro, Model::Grok4];
        let (_, uc) = use_case(endpoint, config(&models));

        let run = completed(uc.execute(&request()).await.unwrap());

        assert_eq!(run.drafts.len(), 2);
        let meta = &run.metadata;
        assert_eq!(meta.label_to_model.model_for(label('A')), Some(&Model::Gpt51));
        assert_eq!(meta.label_to_model.model_for(label('B')), Some(&Model::Grok4));
        assert_eq!(meta.models_requested, models.to_vec());
        assert_eq!(meta.models_responded, vec![Model::Gpt51, Model::Grok4]);
        assert_eq!(meta.models_missing, vec![Model::Gemini3Pro]);

        assert_eq!(run.rankings.len(), 2);
        assert_eq!(meta.aggregate_ranking[0].model, Model::Grok4);
        assert_eq!(meta.aggregate_ranking[0].average_rank, 1.0);
        assert_eq!(meta.aggregate_ranking[0].rankings_count, 2);
        assert_eq!(meta.aggregate_ranking[1].model, Model::Gpt51);
        assert_eq!(meta.aggregate_ranking[1].average_rank, 2.0);

        assert_eq!(meta.selection_strategy, SelectionStrategy::AggregateTop);
        assert_eq!(run.final_artifact.model, Model::Grok4);
        assert_eq!(run.final_artifact.note, NOTE_SELECTED);
        assert!(!meta.refinement_applied);
        assert!(meta.refinement_reasons.is_empty());
        assert!(run.final_artifact.text.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_single_judge_ranking() {
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, GOOD)
            .reply(Kind::Draft, Model::Grok4, GOOD)
            .reply(
                Kind::Judge,
                Model::Gpt51,
                "A: 80\nB: 90\nFINAL RANKING:\n1. Response B\n2. Response A",
            );
        let cfg = config(&[Model::Gpt51, Model::Grok4]).with_judge_model(Model::Gpt51);
        let (endpoint, uc) = use_case(endpoint, cfg);
        let req = request().with_ranking_mode(RankingMode::SingleJudge);

        let run = completed(uc.execute(&req).await.unwrap());

        assert!(endpoint.calls_of(Kind::Peer).is_empty());
        assert_eq!(endpoint.calls_of(Kind::Judge), vec![Model::Gpt51]);
        assert_eq!(run.rankings.len(), 1);
        assert_eq!(run.rankings[0].parsed_labels, vec![label('B'), label('A')]);

        let agg = &run.metadata.aggregate_ranking;
        assert_eq!(agg.len(), 2);
        assert_eq!((agg[0].model.clone(), agg[0].average_rank), (Model::Grok4, 1.0));
        assert_eq!((agg[1].model.clone(), agg[1].average_rank), (Model::Gpt51, 2.0));
        assert_eq!(run.metadata.ranking_mode, RankingMode::SingleJudge);
        assert_eq!(run.final_artifact.model, Model::Grok4);
    }

    #[tokio::test]
    async fn test_failed_judge_falls_back_to_first_draft() {
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, GOOD)
            .reply(Kind::Draft, Model::Grok4, GOOD);
        let cfg = config(&[Model::Gpt51, Model::Grok4]).with_ranking_mode(RankingMode::SingleJudge);
        let (_, uc) = use_case(endpoint, cfg);

        let run = completed(uc.execute(&request()).await.unwrap());

        assert_eq!(run.rankings.len(), 1);
        assert!(run.rankings[0].raw_text.is_empty());
        assert!(run.metadata.aggregate_ranking.is_empty());
        assert_eq!(run.metadata.selection_strategy, SelectionStrategy::FirstDraft);
        assert_eq!(run.final_artifact.model, Model::Gpt51);
    }

    #[tokio::test]
    async fn test_unparseable_rankings_fall_back_to_first_draft() {
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, GOOD)
            .reply(Kind::Draft, Model::Grok4, GOOD)
            .reply(Kind::Peer, Model::Gpt51, "Both are fine.")
            .reply(Kind::Peer, Model::Grok4, "No preference.");
        let (_, uc) = use_case(endpoint, config(&[Model::Gpt51, Model::Grok4]));

        let run = completed(uc.execute(&request()).await.unwrap());

        assert_eq!(run.rankings.len(), 2);
        assert!(run.rankings.iter().all(|r| r.parsed_labels.is_empty()));
        assert_eq!(run.metadata.selection_strategy, SelectionStrategy::FirstDraft);
        assert_eq!(run.final_artifact.model, Model::Gpt51);
    }

    #[tokio::test]
    async fn test_low_score_is_refined_by_polish_model() {
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, WEAK)
            .reply(Kind::Peer, Model::Gpt51, "FINAL RANKING:\n1. Response A")
            .reply(Kind::Polish, Model::Gemini3Pro, GOOD);
        let cfg = config(&[Model::Gpt51]).with_polish_model(Model::Gemini3Pro);
        let (endpoint, uc) = use_case(endpoint, cfg);

        let run = completed(uc.execute(&request()).await.unwrap());

        assert_eq!(endpoint.calls_of(Kind::Polish), vec![Model::Gemini3Pro]);
        assert_eq!(run.metadata.score_proxy, 0.5);
        assert_eq!(
            run.metadata.refinement_reasons,
            vec![RefinementReason::LowScore {
                proxy: 0.5,
                threshold: 0.72
            }]
        );
        assert!(run.metadata.refinement_applied);
        assert_eq!(run.final_artifact.model, Model::Gemini3Pro);
        assert_eq!(run.final_artifact.note, NOTE_REFINED);
        assert!(run.final_artifact.text.contains("Built rust services"));
    }

    #[tokio::test]
    async fn test_failed_polish_keeps_selection_with_note() {
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, WEAK)
            .reply(Kind::Peer, Model::Gpt51, "FINAL RANKING:\n1. Response A");
        let (_, uc) = use_case(endpoint, config(&[Model::Gpt51]));

        let run = completed(uc.execute(&request()).await.unwrap());

        assert!(!run.metadata.refinement_applied);
        assert_eq!(run.final_artifact.model, Model::Gpt51);
        assert_eq!(run.final_artifact.note, NOTE_REFINEMENT_FAILED);
        assert_eq!(run.final_artifact.text, run.drafts[0].text);
    }

    #[tokio::test]
    async fn test_truncated_selection_is_refined() {
        let truncated = "Summary\nBuilt rust services with tokio.\n\nSkills\nRust, Tokio and **";
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, truncated)
            .reply(Kind::Peer, Model::Gpt51, "FINAL RANKING:\n1. Response A")
            .reply(Kind::Polish, Model::Gemini3Pro, GOOD);
        let cfg = config(&[Model::Gpt51]).with_polish_model(Model::Gemini3Pro);
        let (_, uc) = use_case(endpoint, cfg);

        let run = completed(uc.execute(&request()).await.unwrap());

        assert_eq!(run.metadata.refinement_reasons, vec![RefinementReason::Truncated]);
        assert!(run.metadata.refinement_applied);
        assert_eq!(run.final_artifact.note, NOTE_REFINED);
    }

    #[tokio::test]
    async fn test_no_drafts_is_no_content() {
        let endpoint = MockEndpoint::default().reply(Kind::Draft, Model::Grok4, "   \n ");
        let models = [Model::Gpt51, Model::Grok4];
        let (endpoint, uc) = use_case(endpoint, config(&models));

        let outcome = uc.execute(&request()).await.unwrap();

        match outcome {
            DeliberationOutcome::NoContent(report) => {
                assert_eq!(report.models_requested, models.to_vec());
            }
            other => panic!("expected no-content, got {other:?}"),
        }
        assert!(endpoint.calls_of(Kind::Peer).is_empty());
        assert!(endpoint.calls_of(Kind::Polish).is_empty());
    }

    #[tokio::test]
    async fn test_empty_drafting_set_is_rejected() {
        let (_, uc) = use_case(MockEndpoint::default(), config(&[]));
        let err = uc.execute(&request()).await.unwrap_err();
        assert!(matches!(err, DeliberationError::NoModels));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let cfg = config(&[Model::Gpt51]).with_refine_threshold(1.5);
        let (endpoint, uc) = use_case(MockEndpoint::default(), cfg);
        let err = uc.execute(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            DeliberationError::InvalidConfig(ConfigValidationError::ThresholdOutOfRange(_))
        ));
        assert!(endpoint.calls_of(Kind::Draft).is_empty());
    }

    #[tokio::test]
    async fn test_repeated_drafting_model_is_rejected_before_any_call() {
        let cfg = config(&[Model::Gpt51, Model::Gpt51]);
        let (endpoint, uc) = use_case(MockEndpoint::default(), cfg);
        let err = uc.execute(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            DeliberationError::InvalidConfig(ConfigValidationError::DuplicateModel { .. })
        ));
        assert!(endpoint.calls_of(Kind::Draft).is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let (endpoint, uc) = use_case(MockEndpoint::default(), config(&[Model::Gpt51]));
        let uc = uc.with_cancellation(token);

        let err = uc.execute(&request()).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(endpoint.calls_of(Kind::Draft).is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_during_drafting() {
        let endpoint = MockEndpoint::default()
            .hang(Kind::Draft, Model::Gpt51)
            .hang(Kind::Draft, Model::Grok4);
        let cfg = config(&[Model::Gpt51, Model::Grok4]).with_params(role_params(Duration::from_secs(20)));
        let token = CancellationToken::new();
        let (_, uc) = use_case(endpoint, cfg);
        let uc = uc.with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let started = tokio::time::Instant::now();
        let err = uc.execute(&request()).await.unwrap_err();
        canceller.await.unwrap();

        assert!(err.is_cancelled());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {} {}", stage.as_str(), total_tasks));
        }

        fn on_task_complete(&self, stage: &Stage, model: &Model, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("task {} {} {}", stage.as_str(), model, success));
        }

        fn on_stage_complete(&self, stage: &Stage) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {}", stage.as_str()));
        }
    }

    #[tokio::test]
    async fn test_progress_reports_stages_in_order() {
        let endpoint = MockEndpoint::default()
            .reply(Kind::Draft, Model::Gpt51, GOOD)
            .reply(Kind::Peer, Model::Gpt51, "FINAL RANKING:\n1. Response A");
        let (_, uc) = use_case(endpoint, config(&[Model::Gpt51, Model::Grok4]));
        let progress = RecordingProgress::default();

        let run = completed(uc.execute_with_progress(&request(), &progress).await.unwrap());
        assert_eq!(run.final_artifact.note, NOTE_SELECTED);

        let events = progress.events.lock().unwrap();
        let stages: Vec<&str> = events
            .iter()
            .filter(|e| !e.starts_with("task"))
            .map(String::as_str)
            .collect();
        assert_eq!(
            stages,
            vec![
                "start draft 2",
                "done draft",
                "start rank 2",
                "done rank",
                "start finalize 0",
                "done finalize",
            ]
        );
        assert!(events.contains(&"task draft openai/gpt-5.1 true".to_string()));
        assert!(events.contains(&"task draft x-ai/grok-4 false".to_string()));
    }
}
