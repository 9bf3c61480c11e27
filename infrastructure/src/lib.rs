//! Infrastructure layer for draft-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod openrouter;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, FileEndpointConfig};
pub use openrouter::OpenRouterEndpoint;
pub use storage::JsonFileRunStore;
