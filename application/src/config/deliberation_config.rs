//! Deliberation configuration: everything a run needs besides its inputs.
//!
//! [`DeliberationConfig`] is built once (by the config loader or by tests),
//! validated, and handed to
//! [`RunDeliberationUseCase`](crate::use_cases::run_deliberation::RunDeliberationUseCase)
//! at construction. It is never mutated afterwards.

use crate::ports::model_endpoint::GenerationParams;
use council_domain::deliberation::DEFAULT_REFINE_THRESHOLD;
use council_domain::outline::SchemaError;
use council_domain::pack::{
    DEFAULT_MAX_KEYWORDS, DEFAULT_TARGET_PACK_CHARS, DEFAULT_TRUTH_PACK_CHARS, TRUNCATION_RESERVE,
};
use council_domain::ranking::MAX_LABELS;
use council_domain::{Model, RankingMode, SectionSchema};
use std::time::Duration;
use thiserror::Error;

/// Smallest pack budget accepted; anything below would leave no room for
/// text once the truncation reserve is held back.
pub const MIN_PACK_CHARS: usize = TRUNCATION_RESERVE;

/// A configuration value the pipeline cannot run with
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("No drafting models configured")]
    NoDraftingModels,

    #[error("No ranking models configured for peer ranking")]
    NoRankingModels,

    #[error("Too many drafting models: {0} (max {max})", max = MAX_LABELS)]
    TooManyDraftingModels(usize),

    #[error("Empty model name in {0}")]
    EmptyModelName(&'static str),

    #[error("Model {model} listed more than once in {role}")]
    DuplicateModel { role: &'static str, model: String },

    #[error("Timeout for {0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("max_tokens for {0} must be greater than zero")]
    ZeroMaxTokens(&'static str),

    #[error("Refinement threshold must be within 0.0..=1.0, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("{field} must be at least {min} characters, got {got}")]
    BudgetTooSmall {
        field: &'static str,
        min: usize,
        got: usize,
    },

    #[error(transparent)]
    InvalidSchema(#[from] SchemaError),
}

/// Generation parameters per model role
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleParams {
    pub draft: GenerationParams,
    pub rank: GenerationParams,
    pub judge: GenerationParams,
    pub polish: GenerationParams,
}

impl Default for RoleParams {
    fn default() -> Self {
        Self {
            draft: GenerationParams::new(Duration::from_secs(90), 900, 0.5),
            rank: GenerationParams::new(Duration::from_secs(90), 900, 0.2),
            judge: GenerationParams::new(Duration::from_secs(60), 900, 0.2),
            polish: GenerationParams::new(Duration::from_secs(90), 900, 0.4),
        }
    }
}

impl RoleParams {
    fn iter(&self) -> [(&'static str, &GenerationParams); 4] {
        [
            ("draft", &self.draft),
            ("rank", &self.rank),
            ("judge", &self.judge),
            ("polish", &self.polish),
        ]
    }
}

/// Immutable configuration of the deliberation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct DeliberationConfig {
    drafting_models: Vec<Model>,
    ranking_models: Vec<Model>,
    judge_model: Model,
    polish_model: Model,
    ranking_mode: RankingMode,
    refine_threshold: f64,
    /// `None` sends the whole truth source
    truth_pack_chars: Option<usize>,
    target_pack_chars: usize,
    max_keywords: usize,
    schema: SectionSchema,
    style_guide: Option<String>,
    params: RoleParams,
}

impl Default for DeliberationConfig {
    fn default() -> Self {
        Self {
            drafting_models: Model::default_models(),
            ranking_models: Model::default_models(),
            judge_model: Model::default_judge(),
            polish_model: Model::default_polish(),
            ranking_mode: RankingMode::PeerRanking,
            refine_threshold: DEFAULT_REFINE_THRESHOLD,
            truth_pack_chars: Some(DEFAULT_TRUTH_PACK_CHARS),
            target_pack_chars: DEFAULT_TARGET_PACK_CHARS,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            schema: SectionSchema::default(),
            style_guide: None,
            params: RoleParams::default(),
        }
    }
}

impl DeliberationConfig {
    // ==================== Builder Methods ====================

    pub fn with_drafting_models(mut self, models: Vec<Model>) -> Self {
        self.drafting_models = models;
        self
    }

    pub fn with_ranking_models(mut self, models: Vec<Model>) -> Self {
        self.ranking_models = models;
        self
    }

    pub fn with_judge_model(mut self, model: Model) -> Self {
        self.judge_model = model;
        self
    }

    pub fn with_polish_model(mut self, model: Model) -> Self {
        self.polish_model = model;
        self
    }

    pub fn with_ranking_mode(mut self, mode: RankingMode) -> Self {
        self.ranking_mode = mode;
        self
    }

    pub fn with_refine_threshold(mut self, threshold: f64) -> Self {
        self.refine_threshold = threshold;
        self
    }

    pub fn with_truth_pack_chars(mut self, chars: Option<usize>) -> Self {
        self.truth_pack_chars = chars;
        self
    }

    pub fn with_target_pack_chars(mut self, chars: usize) -> Self {
        self.target_pack_chars = chars;
        self
    }

    pub fn with_max_keywords(mut self, max: usize) -> Self {
        self.max_keywords = max;
        self
    }

    pub fn with_schema(mut self, schema: SectionSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_style_guide(mut self, guide: Option<String>) -> Self {
        self.style_guide = guide.filter(|g| !g.trim().is_empty());
        self
    }

    pub fn with_params(mut self, params: RoleParams) -> Self {
        self.params = params;
        self
    }

    // ==================== Accessors ====================

    pub fn drafting_models(&self) -> &[Model] {
        &self.drafting_models
    }

    pub fn ranking_models(&self) -> &[Model] {
        &self.ranking_models
    }

    pub fn judge_model(&self) -> &Model {
        &self.judge_model
    }

    pub fn polish_model(&self) -> &Model {
        &self.polish_model
    }

    pub fn ranking_mode(&self) -> RankingMode {
        self.ranking_mode
    }

    pub fn refine_threshold(&self) -> f64 {
        self.refine_threshold
    }

    pub fn truth_pack_chars(&self) -> Option<usize> {
        self.truth_pack_chars
    }

    pub fn target_pack_chars(&self) -> usize {
        self.target_pack_chars
    }

    pub fn max_keywords(&self) -> usize {
        self.max_keywords
    }

    pub fn schema(&self) -> &SectionSchema {
        &self.schema
    }

    pub fn style_guide(&self) -> Option<&str> {
        self.style_guide.as_deref()
    }

    pub fn params(&self) -> &RoleParams {
        &self.params
    }

    // ==================== Validation ====================

    /// Check every value the pipeline depends on.
    ///
    /// Ranking models are only required when peer ranking is the configured
    /// mode; a request can still switch to peer ranking, in which case an
    /// empty ranking set yields no rankings.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.drafting_models.is_empty() {
            return Err(ConfigValidationError::NoDraftingModels);
        }
        if self.drafting_models.len() > MAX_LABELS {
            return Err(ConfigValidationError::TooManyDraftingModels(
                self.drafting_models.len(),
            ));
        }
        if self.ranking_mode.is_peer() && self.ranking_models.is_empty() {
            return Err(ConfigValidationError::NoRankingModels);
        }

        let named = [
            ("drafting models", self.drafting_models.as_slice()),
            ("ranking models", self.ranking_models.as_slice()),
            ("judge model", std::slice::from_ref(&self.judge_model)),
            ("polish model", std::slice::from_ref(&self.polish_model)),
        ];
        for (role, models) in named {
            if models.iter().any(|m| m.as_str().trim().is_empty()) {
                return Err(ConfigValidationError::EmptyModelName(role));
            }
            if let Some(dup) = first_repeat(models) {
                return Err(ConfigValidationError::DuplicateModel {
                    role,
                    model: dup.to_string(),
                });
            }
        }

        for (role, params) in self.params.iter() {
            if params.timeout.is_zero() {
                return Err(ConfigValidationError::ZeroTimeout(role));
            }
            if params.max_tokens == 0 {
                return Err(ConfigValidationError::ZeroMaxTokens(role));
            }
        }

        if !(0.0..=1.0).contains(&self.refine_threshold) {
            return Err(ConfigValidationError::ThresholdOutOfRange(
                self.refine_threshold,
            ));
        }
        let budgets = [
            ("truth_pack_chars", self.truth_pack_chars),
            ("target_pack_chars", Some(self.target_pack_chars)),
        ];
        for (field, budget) in budgets {
            if let Some(got) = budget
                && got < MIN_PACK_CHARS
            {
                return Err(ConfigValidationError::BudgetTooSmall {
                    field,
                    min: MIN_PACK_CHARS,
                    got,
                });
            }
        }
        self.schema.validate()?;
        Ok(())
    }
}

fn first_repeat(models: &[Model]) -> Option<&Model> {
    models
        .iter()
        .enumerate()
        .find_map(|(i, m)| models[..i].iter().any(|p| p.as_str() == m.as_str()).then_some(m))
}
