//! Outline Normalizer: make generated documents follow a [`SectionSchema`].

pub mod enforce;
pub mod heuristics;
pub mod schema;

pub use enforce::enforce_outline;
pub use heuristics::{HeadingPresence, HeuristicScore, looks_truncated};
pub use schema::{DEFAULT_SENTINEL, SchemaError, SectionSchema};
