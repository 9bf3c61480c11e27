//! Best-draft selection.
//!
//! Strategies are tried in [`SelectionStrategy::ORDER`]; the first that
//! yields a draft wins and is recorded in the run metadata.

use super::value_objects::{Draft, RankingResult};
use crate::core::model::Model;
use crate::ranking::{AggregateRanking, LabelMap};
use serde::{Deserialize, Serialize};

/// Inputs the strategies choose from.
#[derive(Debug, Clone, Copy)]
pub struct Candidates<'a> {
    pub drafts: &'a [Draft],
    pub labels: &'a LabelMap,
    pub rankings: &'a [RankingResult],
    pub aggregate: &'a [AggregateRanking],
}

impl<'a> Candidates<'a> {
    fn draft_of(&self, model: &Model) -> Option<&'a Draft> {
        self.drafts.iter().find(|d| &d.model == model)
    }
}

/// How the finalized draft was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Best average rank
    AggregateTop,
    /// First label in the primary ranker's parsed ordering
    PrimaryParsedLabel,
    /// First draft produced
    FirstDraft,
}

impl SelectionStrategy {
    pub const ORDER: [SelectionStrategy; 3] = [
        SelectionStrategy::AggregateTop,
        SelectionStrategy::PrimaryParsedLabel,
        SelectionStrategy::FirstDraft,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SelectionStrategy::AggregateTop => "aggregate_top",
            SelectionStrategy::PrimaryParsedLabel => "primary_parsed_label",
            SelectionStrategy::FirstDraft => "first_draft",
        }
    }

    /// Apply this strategy alone.
    pub fn pick<'a>(&self, c: &Candidates<'a>) -> Option<&'a Draft> {
        match self {
            SelectionStrategy::AggregateTop => {
                c.aggregate.first().and_then(|top| c.draft_of(&top.model))
            }
            SelectionStrategy::PrimaryParsedLabel => c
                .rankings
                .first()
                .and_then(|r| r.parsed_labels.first())
                .and_then(|label| c.labels.model_for(*label))
                .and_then(|model| c.draft_of(model)),
            SelectionStrategy::FirstDraft => c.drafts.first(),
        }
    }
}

impl std::fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Run the strategies top-down. `None` only when there are no drafts.
pub fn select_best<'a>(c: &Candidates<'a>) -> Option<(&'a Draft, SelectionStrategy)> {
    SelectionStrategy::ORDER
        .iter()
        .find_map(|s| s.pick(c).map(|draft| (draft, *s)))
}
