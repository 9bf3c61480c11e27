//! Model selection from TOML (`[models]` section)

use super::ConfigError;
use council_domain::Model;
use serde::{Deserialize, Serialize};

fn council() -> Vec<String> {
    Model::default_models()
        .iter()
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Model identifiers per role
///
/// # Example
///
/// ```toml
/// [models]
/// drafting = ["openai/gpt-5.1", "google/gemini-3-pro-preview"]
/// ranking = ["openai/gpt-5.1", "x-ai/grok-4"]
/// judge = "openai/gpt-5.1"
/// polish = "google/gemini-3-pro-preview"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Models that each write a draft
    pub drafting: Vec<String>,
    /// Models that rank each other's drafts in peer mode
    pub ranking: Vec<String>,
    /// Single judge used when peer ranking is off
    pub judge: String,
    /// Model that polishes a weak selection
    pub polish: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            drafting: council(),
            ranking: council(),
            judge: Model::default_judge().as_str().to_string(),
            polish: Model::default_polish().as_str().to_string(),
        }
    }
}

impl FileModelsConfig {
    fn parse_single(field: &'static str, value: &str) -> Result<Model, ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyModelName { field });
        }
        // Model::from_str is infallible; unknown names become Custom(...)
        Ok(value.trim().parse().unwrap())
    }

    fn parse_list(field: &'static str, values: &[String]) -> Result<Vec<Model>, ConfigError> {
        values.iter().map(|v| Self::parse_single(field, v)).collect()
    }

    pub fn parse_drafting(&self) -> Result<Vec<Model>, ConfigError> {
        Self::parse_list("drafting", &self.drafting)
    }

    pub fn parse_ranking(&self) -> Result<Vec<Model>, ConfigError> {
        Self::parse_list("ranking", &self.ranking)
    }

    pub fn parse_judge(&self) -> Result<Model, ConfigError> {
        Self::parse_single("judge", &self.judge)
    }

    pub fn parse_polish(&self) -> Result<Model, ConfigError> {
        Self::parse_single("polish", &self.polish)
    }
}
