//! Configuration file loading for draft-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/draft-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileBudgetConfig, FileConfig,
    FileEndpointConfig, FileModelsConfig, FilePackConfig, FileRankingConfig,
    FileRefinementConfig, FileRoleBudget,
};
pub use loader::ConfigLoader;
