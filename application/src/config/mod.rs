//! Application-level configuration.
//!
//! - [`DeliberationConfig`] - models, ranking mode, budgets and per-role
//!   generation parameters for the deliberation pipeline

pub mod deliberation_config;

pub use deliberation_config::{ConfigValidationError, DeliberationConfig, RoleParams};
