//! Domain layer for draft-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Deliberation
//!
//! Several models each draft a document from the same inputs. The drafts
//! are anonymized as `Response A`, `Response B`, ... and ranked, either by
//! every ranking model (peer ranking) or by one judge. The best draft is
//! normalized to the required outline and, when cheap heuristics say it is
//! weak, polished once more.
//!
//! ## Building blocks
//!
//! - [`pack`]: token-saving truth and target packs
//! - [`ranking`]: labels, free-text ranking parsing, rank aggregation
//! - [`outline`]: section schema, outline enforcement, heuristics
//! - [`deliberation`]: stages, selection strategies, refinement gate, results

pub mod core;
pub mod deliberation;
pub mod outline;
pub mod pack;
pub mod prompt;
pub mod ranking;
pub mod session;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model, request::DeliberationRequest};
pub use deliberation::{
    Candidates, DeliberationOutcome, DeliberationRun, Draft, FinalArtifact, GateDecision,
    NoContentReport, RankingMode, RankingResult, RefinementGate, RefinementReason, RunMetadata,
    SelectionStrategy, Stage, select_best,
};
pub use outline::{HeuristicScore, SectionSchema, enforce_outline};
pub use pack::{CandidatePack, TargetPack};
pub use prompt::{PromptContext, PromptTemplate};
pub use ranking::{AggregateRanking, Label, LabelMap, aggregate, parse_ranking, single_judge_aggregate};
pub use session::entities::{Message, Role};
