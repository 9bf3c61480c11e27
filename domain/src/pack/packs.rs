//! Compact, reusable context packs built from raw inputs.

use super::keywords::extract_keywords;
use super::normalize::{compact, normalize};
use super::sections::pin_sections;
use crate::core::string::char_len;
use crate::outline::SectionSchema;
use serde::{Deserialize, Serialize};

/// Default truth-source budget in characters.
pub const DEFAULT_TRUTH_PACK_CHARS: usize = 60_000;
/// Default target-description budget in characters.
pub const DEFAULT_TARGET_PACK_CHARS: usize = 3_500;
/// Default keyword cap.
pub const DEFAULT_MAX_KEYWORDS: usize = 40;

/// Length-bounded truth source with pinned sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePack {
    text: String,
    /// Whether the truth source was sent untruncated
    full: bool,
}

impl CandidatePack {
    /// Build the truth pack.
    ///
    /// `max_chars = None` sends the whole (normalized) truth source. The
    /// schema's recoverable headings are pinned so truncation cannot make
    /// them look absent to downstream models.
    pub fn build(raw: &str, max_chars: Option<usize>, schema: &SectionSchema) -> Self {
        let base = match max_chars {
            Some(max) => compact(raw, max),
            None => normalize(raw),
        };
        let text = pin_sections(raw, &base, schema, schema.recoverable_headings());
        Self {
            text,
            full: max_chars.is_none(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// Compacted target description plus ranked keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPack {
    text: String,
    keywords: Vec<String>,
}

impl TargetPack {
    pub fn build(description: &str, max_chars: usize, max_keywords: usize) -> Self {
        let text = compact(description, max_chars);
        let keywords = extract_keywords(&text, max_keywords);
        Self { text, keywords }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
