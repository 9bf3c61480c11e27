//! Cheap, code-computed quality signals for a draft.

use super::schema::SectionSchema;
use crate::core::string::char_len;
use serde::{Deserialize, Serialize};

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Per-heading presence flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingPresence {
    pub heading: String,
    pub present: bool,
}

/// Heuristic score of one draft against the target keywords and schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicScore {
    /// Target keywords found in the text (case-insensitive substring)
    pub keyword_hits: Vec<String>,
    /// `hits / max(1, keywords)`, rounded to three decimals
    pub keyword_hit_rate: f64,
    pub headings_present: Vec<HeadingPresence>,
    /// Fraction of required headings present, rounded to three decimals
    pub section_completeness: f64,
    pub length_chars: usize,
}

impl HeuristicScore {
    pub fn compute(text: &str, keywords: &[String], schema: &SectionSchema) -> Self {
        let lower = text.to_lowercase();

        let keyword_hits: Vec<String> = keywords
            .iter()
            .filter(|kw| lower.contains(&kw.to_lowercase()))
            .cloned()
            .collect();
        let keyword_hit_rate = round3(keyword_hits.len() as f64 / keywords.len().max(1) as f64);

        let headings_present: Vec<HeadingPresence> = schema
            .required_headings()
            .iter()
            .map(|h| HeadingPresence {
                heading: h.clone(),
                present: lower.contains(&h.to_lowercase()),
            })
            .collect();
        let present = headings_present.iter().filter(|h| h.present).count();
        let section_completeness = round3(present as f64 / headings_present.len().max(1) as f64);

        Self {
            keyword_hits,
            keyword_hit_rate,
            headings_present,
            section_completeness,
            length_chars: char_len(text),
        }
    }

    /// `0.5 * keyword_hit_rate + 0.5 * section_completeness`
    pub fn score_proxy(&self) -> f64 {
        0.5 * self.keyword_hit_rate + 0.5 * self.section_completeness
    }
}

/// A selection cut off mid-emphasis (trimmed text ends with `**`).
pub fn looks_truncated(text: &str) -> bool {
    text.trim().ends_with("**")
}
