//! Refinement gate and style guide from TOML (`[refinement]` section)

use super::ConfigError;
use council_domain::deliberation::DEFAULT_REFINE_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [refinement]
/// threshold = 0.72
/// style_guide_path = "~/docs/cv-strategy.md"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRefinementConfig {
    /// Polish when the heuristic proxy falls below this
    pub threshold: f64,
    /// Inline guidance appended to every prompt; wins over the path
    pub style_guide: Option<String>,
    /// File holding a longer strategy document
    pub style_guide_path: Option<PathBuf>,
}

impl Default for FileRefinementConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REFINE_THRESHOLD,
            style_guide: None,
            style_guide_path: None,
        }
    }
}

impl FileRefinementConfig {
    /// Resolve the style guide text, reading the file when only a path is set.
    pub fn load_style_guide(&self) -> Result<Option<String>, ConfigError> {
        if let Some(inline) = self.style_guide.as_deref()
            && !inline.trim().is_empty()
        {
            return Ok(Some(inline.trim().to_string()));
        }
        let Some(path) = &self.style_guide_path else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::StyleGuide {
            path: path.clone(),
            source,
        })?;
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }
}
