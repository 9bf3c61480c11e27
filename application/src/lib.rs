//! Application layer for draft-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigValidationError, DeliberationConfig, RoleParams};
pub use ports::{
    model_endpoint::{EndpointError, GenerationParams, ModelEndpoint},
    progress::{NoProgress, ProgressNotifier},
    run_store::{RunRecord, RunStore, RunStoreError, RunSummary},
};
pub use use_cases::dispatch::FanOutDispatcher;
pub use use_cases::persist_run::PersistRunUseCase;
pub use use_cases::run_deliberation::{DeliberationError, RunDeliberationUseCase};
