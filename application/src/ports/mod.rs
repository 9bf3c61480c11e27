//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod model_endpoint;
pub mod progress;
pub mod run_store;
