//! Refinement gate: decide whether the selected draft is worth polishing.

use crate::outline::{HeuristicScore, SectionSchema, looks_truncated};
use serde::{Deserialize, Serialize};

/// Default proxy score below which the selection is refined.
pub const DEFAULT_REFINE_THRESHOLD: f64 = 0.72;

/// Why a selection was sent to the polish model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RefinementReason {
    /// Required headings absent from the selected text
    MissingSections { headings: Vec<String> },
    /// Selected text ends mid-emphasis
    Truncated,
    /// Heuristic proxy under the threshold
    LowScore { proxy: f64, threshold: f64 },
}

/// Gate verdict for one selection
#[derive(Debug, Clone, PartialEq)]
pub struct GateDecision {
    pub reasons: Vec<RefinementReason>,
    /// Score of the re-normalized selection
    pub score: HeuristicScore,
    pub proxy: f64,
}

impl GateDecision {
    pub fn should_refine(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// Refine iff a heading is missing, the text looks truncated, or
/// `0.5 * keyword_hit_rate + 0.5 * section_completeness < threshold`.
///
/// # Example
///
/// ```
/// use council_domain::deliberation::RefinementGate;
/// use council_domain::outline::SectionSchema;
///
/// let schema = SectionSchema::new(["Summary"]);
/// let gate = RefinementGate::new(0.72);
/// let keywords = vec!["rust".to_string()];
/// let text = "Summary\nRust services.\n";
///
/// let decision = gate.evaluate(text, text, &keywords, &schema);
/// assert!(!decision.should_refine());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementGate {
    threshold: f64,
}

impl Default for RefinementGate {
    fn default() -> Self {
        Self::new(DEFAULT_REFINE_THRESHOLD)
    }
}

impl RefinementGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate a selection.
    ///
    /// `raw` is the selected text as drafted and drives the missing-heading
    /// and truncation checks; `normalized` is the outline-enforced text the
    /// heuristic proxy is computed on.
    pub fn evaluate(
        &self,
        raw: &str,
        normalized: &str,
        keywords: &[String],
        schema: &SectionSchema,
    ) -> GateDecision {
        let mut reasons = Vec::new();

        let missing: Vec<String> = schema
            .missing_headings(raw)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            reasons.push(RefinementReason::MissingSections { headings: missing });
        }

        if looks_truncated(raw) {
            reasons.push(RefinementReason::Truncated);
        }

        let score = HeuristicScore::compute(normalized, keywords, schema);
        let proxy = score.score_proxy();
        if proxy < self.threshold {
            reasons.push(RefinementReason::LowScore {
                proxy,
                threshold: self.threshold,
            });
        }

        GateDecision {
            reasons,
            score,
            proxy,
        }
    }
}
