//! Deliberation: the draft, rank and finalize pipeline's domain types.
//!
//! - [`Stage`] / [`RankingMode`] - pipeline stages and how drafts are ranked
//! - [`select_best`] - ordered best-draft selection strategies
//! - [`RefinementGate`] - whether the selection is sent to the polish model
//! - [`DeliberationRun`] / [`DeliberationOutcome`] - what a run produces

pub mod entities;
pub mod gate;
pub mod selection;
pub mod value_objects;

pub use entities::{RankingMode, Stage};
pub use gate::{DEFAULT_REFINE_THRESHOLD, GateDecision, RefinementGate, RefinementReason};
pub use selection::{Candidates, SelectionStrategy, select_best};
pub use value_objects::{
    DeliberationOutcome, DeliberationRun, Draft, FinalArtifact, NOTE_REFINED,
    NOTE_REFINEMENT_FAILED, NOTE_SELECTED, NoContentReport, RankingResult, RunMetadata,
};
