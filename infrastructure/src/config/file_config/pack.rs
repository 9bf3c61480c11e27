//! Pack budgets from TOML (`[pack]` section)

use council_domain::pack::{DEFAULT_MAX_KEYWORDS, DEFAULT_TARGET_PACK_CHARS, DEFAULT_TRUTH_PACK_CHARS};
use serde::{Deserialize, Serialize};

/// ```toml
/// [pack]
/// truth_pack_chars = 60000
/// send_full_truth = false
/// target_pack_chars = 3500
/// max_keywords = 40
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePackConfig {
    pub truth_pack_chars: usize,
    /// Skip truncation of the truth source entirely
    pub send_full_truth: bool,
    pub target_pack_chars: usize,
    pub max_keywords: usize,
}

impl Default for FilePackConfig {
    fn default() -> Self {
        Self {
            truth_pack_chars: DEFAULT_TRUTH_PACK_CHARS,
            send_full_truth: false,
            target_pack_chars: DEFAULT_TARGET_PACK_CHARS,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}

impl FilePackConfig {
    pub fn truth_budget(&self) -> Option<usize> {
        (!self.send_full_truth).then_some(self.truth_pack_chars)
    }
}
