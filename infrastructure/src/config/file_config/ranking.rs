//! Ranking mode from TOML (`[ranking]` section)

use super::ConfigError;
use council_domain::RankingMode;
use serde::{Deserialize, Serialize};

/// ```toml
/// [ranking]
/// mode = "peer"   # or "judge"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRankingConfig {
    /// `peer` / `peer_ranking` or `judge` / `single_judge`
    pub mode: String,
}

impl Default for FileRankingConfig {
    fn default() -> Self {
        Self {
            mode: RankingMode::default().as_str().to_string(),
        }
    }
}

impl FileRankingConfig {
    pub fn parse_mode(&self) -> Result<RankingMode, ConfigError> {
        self.mode.parse().map_err(ConfigError::InvalidRankingMode)
    }
}
