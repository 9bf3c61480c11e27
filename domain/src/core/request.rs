//! Deliberation request value object

use super::error::DomainError;
use crate::deliberation::entities::RankingMode;
use serde::{Deserialize, Serialize};

/// Inputs for one deliberation run (Value Object)
///
/// The truth source is the authoritative text generated content must stay
/// faithful to; the target description is what the artifact is tailored
/// toward. Both must be non-blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationRequest {
    truth_source: String,
    target_description: String,
    /// Free-form tone/context hints (e.g. company details)
    #[serde(default)]
    context_notes: String,
    /// Overrides the configured ranking mode for this run only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ranking_mode: Option<RankingMode>,
}

impl DeliberationRequest {
    /// Create a validated request
    pub fn new(
        truth_source: impl Into<String>,
        target_description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let truth_source = truth_source.into();
        let target_description = target_description.into();

        if truth_source.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "truth source is required".to_string(),
            ));
        }
        if target_description.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "target description is required".to_string(),
            ));
        }

        Ok(Self {
            truth_source,
            target_description,
            context_notes: String::new(),
            ranking_mode: None,
        })
    }

    pub fn with_context_notes(mut self, notes: impl Into<String>) -> Self {
        self.context_notes = notes.into();
        self
    }

    pub fn with_ranking_mode(mut self, mode: RankingMode) -> Self {
        self.ranking_mode = Some(mode);
        self
    }

    pub fn truth_source(&self) -> &str {
        &self.truth_source
    }

    pub fn target_description(&self) -> &str {
        &self.target_description
    }

    pub fn context_notes(&self) -> &str {
        &self.context_notes
    }

    pub fn ranking_mode(&self) -> Option<RankingMode> {
        self.ranking_mode
    }

    /// Short human-readable title derived from the first lines of the target
    ///
    /// Takes the first three lines of the trimmed description, drops blank
    /// ones, joins the rest with spaces and caps the result at 60 characters.
    pub fn title(&self) -> String {
        let joined = self
            .target_description
            .trim()
            .lines()
            .take(3)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            return "Deliberation Run".to_string();
        }
        super::string::truncate(&joined, 60)
    }
}
