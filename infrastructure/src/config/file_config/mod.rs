//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`DeliberationConfig`] by [`FileConfig::to_deliberation_config`].

mod budget;
mod endpoint;
mod models;
mod pack;
mod ranking;
mod refinement;

pub use budget::{FileBudgetConfig, FileRoleBudget};
pub use endpoint::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileEndpointConfig};
pub use models::FileModelsConfig;
pub use pack::FilePackConfig;
pub use ranking::FileRankingConfig;
pub use refinement::FileRefinementConfig;

use council_application::{ConfigValidationError, DeliberationConfig};
use council_domain::SectionSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A configuration file value that cannot become a [`DeliberationConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("models.{field}: model name cannot be empty")]
    EmptyModelName { field: &'static str },

    #[error("ranking.mode: {0}")]
    InvalidRankingMode(String),

    #[error("refinement.style_guide_path: cannot read {}: {source}", path.display())]
    StyleGuide {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Models per role
    pub models: FileModelsConfig,
    /// Peer ranking or single judge
    pub ranking: FileRankingConfig,
    /// Gate threshold and style guide
    pub refinement: FileRefinementConfig,
    /// Truth and target pack budgets
    pub pack: FilePackConfig,
    /// Per-role generation parameters
    pub budget: FileBudgetConfig,
    /// Required document outline
    pub outline: SectionSchema,
    /// Remote model endpoint
    pub endpoint: FileEndpointConfig,
}

impl FileConfig {
    /// Convert into a validated [`DeliberationConfig`].
    pub fn to_deliberation_config(&self) -> Result<DeliberationConfig, ConfigError> {
        let config = DeliberationConfig::default()
            .with_drafting_models(self.models.parse_drafting()?)
            .with_ranking_models(self.models.parse_ranking()?)
            .with_judge_model(self.models.parse_judge()?)
            .with_polish_model(self.models.parse_polish()?)
            .with_ranking_mode(self.ranking.parse_mode()?)
            .with_refine_threshold(self.refinement.threshold)
            .with_style_guide(self.refinement.load_style_guide()?)
            .with_truth_pack_chars(self.pack.truth_budget())
            .with_target_pack_chars(self.pack.target_pack_chars)
            .with_max_keywords(self.pack.max_keywords)
            .with_schema(self.outline.clone())
            .with_params(self.budget.to_role_params());
        config.validate()?;
        Ok(config)
    }
}
