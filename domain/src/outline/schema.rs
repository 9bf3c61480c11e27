//! Section schema: the structural contract a finalized artifact must meet.

use crate::pack::sections::normalize_heading;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body emitted for a required section that has no content.
pub const DEFAULT_SENTINEL: &str = "N/A";

/// A schema [`enforce_outline`](super::enforce_outline) cannot honor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Section schema has no required headings")]
    NoRequiredHeadings,

    #[error("Section schema has a blank required heading")]
    BlankHeading,

    #[error("Required heading listed more than once: {0}")]
    DuplicateHeading(String),

    #[error("Recoverable heading is not a required heading: {0}")]
    UnknownRecoverable(String),

    #[error("Section schema sentinel must not be blank")]
    BlankSentinel,
}

/// Required section layout for generated documents
///
/// - `required`: headings every artifact must contain, in this order
/// - `recoverable`: required headings that may be backfilled from the truth
///   source (and are pinned when the truth source is truncated)
/// - `aliases`: additional heading names that terminate a section during
///   extraction but are not themselves required
///
/// # Example
///
/// ```
/// use council_domain::outline::SectionSchema;
///
/// let schema = SectionSchema::default();
/// assert_eq!(schema.required_headings()[0], "Summary");
/// assert_eq!(schema.match_required("## projects:"), Some("Projects"));
/// assert!(schema.is_known_heading("skills"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSchema {
    required: Vec<String>,
    #[serde(default)]
    recoverable: Vec<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default = "default_sentinel")]
    sentinel: String,
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

impl SectionSchema {
    /// Create a schema with the given required headings and no recoverable
    /// sections or aliases.
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            recoverable: Vec::new(),
            aliases: Vec::new(),
            sentinel: default_sentinel(),
        }
    }

    /// Tailored-résumé layout.
    pub fn resume() -> Self {
        Self::new([
            "Summary",
            "Education",
            "Technical Skills",
            "Professional Experience",
            "Projects",
            "Certifications",
        ])
        .with_recoverable(["Projects", "Certifications"])
        .with_aliases(["skills", "experience"])
    }

    pub fn with_recoverable<I, S>(mut self, headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recoverable = headings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn required_headings(&self) -> &[String] {
        &self.required
    }

    pub fn recoverable_headings(&self) -> &[String] {
        &self.recoverable
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Check that every artifact built from this schema can carry each
    /// required heading exactly once with a non-empty body.
    ///
    /// Headings are compared after heading normalization, so `Summary` and
    /// `## summary:` count as the same heading.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.required.is_empty() {
            return Err(SchemaError::NoRequiredHeadings);
        }
        let mut seen: Vec<String> = Vec::with_capacity(self.required.len());
        for heading in &self.required {
            let key = normalize_heading(heading);
            if key.is_empty() {
                return Err(SchemaError::BlankHeading);
            }
            if seen.contains(&key) {
                return Err(SchemaError::DuplicateHeading(heading.clone()));
            }
            seen.push(key);
        }
        if let Some(stray) = self
            .recoverable
            .iter()
            .find(|h| !seen.contains(&normalize_heading(h)))
        {
            return Err(SchemaError::UnknownRecoverable(stray.clone()));
        }
        if self.sentinel.trim().is_empty() {
            return Err(SchemaError::BlankSentinel);
        }
        Ok(())
    }

    /// Whether `heading` is one of the recoverable headings (case-insensitive).
    pub fn is_recoverable(&self, heading: &str) -> bool {
        self.recoverable
            .iter()
            .any(|h| h.eq_ignore_ascii_case(heading))
    }

    /// Whether an already-normalized heading is known to this schema.
    ///
    /// Known headings are the required ones plus the aliases.
    pub fn is_known_heading(&self, normalized: &str) -> bool {
        self.required
            .iter()
            .chain(self.aliases.iter())
            .any(|h| h.to_lowercase() == normalized)
    }

    /// Match a raw line against the required headings.
    ///
    /// Returns the canonical heading text when the line is a heading line
    /// for one of the required sections.
    pub fn match_required(&self, line: &str) -> Option<&str> {
        let normalized = normalize_heading(line);
        if normalized.is_empty() {
            return None;
        }
        self.required
            .iter()
            .find(|h| h.to_lowercase() == normalized)
            .map(String::as_str)
    }

    /// Required headings absent from `text` (case-insensitive substring check).
    pub fn missing_headings(&self, text: &str) -> Vec<&str> {
        let lower = text.to_lowercase();
        self.required
            .iter()
            .filter(|h| !lower.contains(&h.to_lowercase()))
            .map(String::as_str)
            .collect()
    }
}

impl Default for SectionSchema {
    fn default() -> Self {
        Self::resume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_schema_layout() {
        let schema = SectionSchema::resume();
        assert_eq!(schema.required_headings().len(), 6);
        assert_eq!(schema.recoverable_headings(), ["Projects", "Certifications"]);
        assert_eq!(schema.sentinel(), "N/A");
    }

    #[test]
    fn test_match_required_ignores_markers() {
        let schema = SectionSchema::resume();
        assert_eq!(schema.match_required("# Summary"), Some("Summary"));
        assert_eq!(schema.match_required("**EDUCATION**:"), Some("Education"));
        assert_eq!(
            schema.match_required("Professional Experience —"),
            Some("Professional Experience")
        );
        assert_eq!(schema.match_required("Summary of work"), None);
        assert_eq!(schema.match_required(""), None);
    }

    #[test]
    fn test_known_headings_include_aliases() {
        let schema = SectionSchema::resume();
        assert!(schema.is_known_heading("experience"));
        assert!(schema.is_known_heading("technical skills"));
        assert!(!schema.is_known_heading("hobbies"));
    }

    #[test]
    fn test_missing_headings() {
        let schema = SectionSchema::new(["Intro", "Body"]);
        assert_eq!(schema.missing_headings("intro\nstuff"), vec!["Body"]);
        assert!(schema.missing_headings("INTRO BODY").is_empty());
    }

    #[test]
    fn test_recoverable_case_insensitive() {
        let schema = SectionSchema::resume();
        assert!(schema.is_recoverable("projects"));
        assert!(!schema.is_recoverable("Summary"));
    }

    #[test]
    fn test_resume_schema_is_valid() {
        assert_eq!(SectionSchema::resume().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_blank_sentinel() {
        let schema: SectionSchema =
            serde_json::from_str(r#"{"required": ["A", "B"], "sentinel": " "}"#).unwrap();
        assert_eq!(schema.validate(), Err(SchemaError::BlankSentinel));
    }

    #[test]
    fn test_validate_rejects_repeated_heading() {
        let schema = SectionSchema::new(["Summary", "Skills", "## summary:"]);
        assert_eq!(
            schema.validate(),
            Err(SchemaError::DuplicateHeading("## summary:".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_blank_and_missing_headings() {
        assert_eq!(
            SectionSchema::new(Vec::<String>::new()).validate(),
            Err(SchemaError::NoRequiredHeadings)
        );
        assert_eq!(
            SectionSchema::new(["Summary", "**"]).validate(),
            Err(SchemaError::BlankHeading)
        );
    }

    #[test]
    fn test_validate_rejects_recoverable_outside_required() {
        let schema = SectionSchema::new(["Summary"]).with_recoverable(["Projects"]);
        assert_eq!(
            schema.validate(),
            Err(SchemaError::UnknownRecoverable("Projects".to_string()))
        );
        let schema = SectionSchema::new(["Summary", "Projects"]).with_recoverable(["projects"]);
        assert_eq!(schema.validate(), Ok(()));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let schema: SectionSchema =
            serde_json::from_str(r#"{"required": ["A", "B"]}"#).unwrap();
        assert_eq!(schema.required_headings(), ["A", "B"]);
        assert_eq!(schema.sentinel(), "N/A");
        assert!(schema.recoverable_headings().is_empty());
    }
}
