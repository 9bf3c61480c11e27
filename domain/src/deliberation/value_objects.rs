//! Deliberation value objects - immutable results of each stage.
//!
//! - [`Draft`] - one model's candidate from the Draft stage
//! - [`RankingResult`] - one ranker's (or the judge's) ordering
//! - [`FinalArtifact`] - the finalized document
//! - [`DeliberationRun`] - everything a completed run produced
//! - [`DeliberationOutcome`] - a completed run, or a report that nothing came back

use super::entities::RankingMode;
use super::gate::RefinementReason;
use super::selection::SelectionStrategy;
use crate::core::model::Model;
use crate::outline::HeuristicScore;
use crate::ranking::{AggregateRanking, Label, LabelMap};
use serde::{Deserialize, Serialize};

/// Note on an artifact taken straight from the selected draft.
pub const NOTE_SELECTED: &str = "Selected best draft (no refinement).";
/// Note on an artifact produced by the polish model.
pub const NOTE_REFINED: &str = "Refinement applied.";
/// Note on an artifact whose polish call came back empty or failed.
pub const NOTE_REFINEMENT_FAILED: &str = "Refinement failed; returning best draft.";

/// A candidate produced by one drafting model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub model: Model,
    /// Outline-normalized text
    pub text: String,
}

impl Draft {
    pub fn new(model: Model, text: impl Into<String>) -> Self {
        Self {
            model,
            text: text.into(),
        }
    }
}

/// One ranker's verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    /// The ranking model or the judge
    pub model: Model,
    /// Full response text (empty when the judge call failed)
    pub raw_text: String,
    /// Known labels only, deduplicated, first-seen order
    pub parsed_labels: Vec<Label>,
}

impl RankingResult {
    pub fn new(model: Model, raw_text: impl Into<String>, parsed_labels: Vec<Label>) -> Self {
        Self {
            model,
            raw_text: raw_text.into(),
            parsed_labels,
        }
    }

    /// A judge that produced nothing.
    pub fn empty(model: Model) -> Self {
        Self::new(model, String::new(), Vec::new())
    }
}

/// The single finalized document of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalArtifact {
    pub model: Model,
    pub text: String,
    pub note: String,
}

impl FinalArtifact {
    pub fn selected(model: Model, text: impl Into<String>) -> Self {
        Self {
            model,
            text: text.into(),
            note: NOTE_SELECTED.to_string(),
        }
    }

    pub fn refined(polish_model: Model, text: impl Into<String>) -> Self {
        Self {
            model: polish_model,
            text: text.into(),
            note: NOTE_REFINED.to_string(),
        }
    }

    pub fn refinement_failed(model: Model, text: impl Into<String>) -> Self {
        Self {
            model,
            text: text.into(),
            note: NOTE_REFINEMENT_FAILED.to_string(),
        }
    }
}

/// Run bookkeeping attached to a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub label_to_model: LabelMap,
    pub aggregate_ranking: Vec<AggregateRanking>,
    pub models_requested: Vec<Model>,
    pub models_responded: Vec<Model>,
    pub models_missing: Vec<Model>,
    pub refinement_applied: bool,
    pub ranking_mode: RankingMode,
    pub selection_strategy: SelectionStrategy,
    pub refinement_reasons: Vec<RefinementReason>,
    pub score_proxy: f64,
    pub selected_score: HeuristicScore,
    pub truth_pack_chars: usize,
    pub truth_pack_full: bool,
    pub target_keywords: Vec<String>,
}

/// Everything a completed run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationRun {
    pub drafts: Vec<Draft>,
    pub rankings: Vec<RankingResult>,
    #[serde(rename = "final")]
    pub final_artifact: FinalArtifact,
    pub metadata: RunMetadata,
}

/// Report for a run in which no drafting model returned usable text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoContentReport {
    pub models_requested: Vec<Model>,
    pub message: String,
}

impl NoContentReport {
    pub fn new(models_requested: Vec<Model>) -> Self {
        Self {
            message: format!(
                "None of the {} drafting model(s) returned usable text.",
                models_requested.len()
            ),
            models_requested,
        }
    }
}

/// Result of a deliberation that was not cancelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliberationOutcome {
    Completed(DeliberationRun),
    NoContent(NoContentReport),
}

impl DeliberationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, DeliberationOutcome::Completed(_))
    }

    pub fn run(&self) -> Option<&DeliberationRun> {
        match self {
            DeliberationOutcome::Completed(run) => Some(run),
            DeliberationOutcome::NoContent(_) => None,
        }
    }

    pub fn final_text(&self) -> Option<&str> {
        self.run().map(|r| r.final_artifact.text.as_str())
    }
}
