//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Too many candidates to label: {0} (max {max})", max = crate::ranking::label::MAX_LABELS)]
    TooManyCandidates(usize),

    #[error("Model listed more than once: {0}")]
    DuplicateModel(String),
}
