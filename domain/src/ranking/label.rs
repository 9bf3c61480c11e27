//! Anonymous draft labels and the per-run label map.

use crate::core::{error::DomainError, model::Model};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most candidates a single run can label (`A` through `Z`).
pub const MAX_LABELS: usize = 26;

/// Anonymous identifier for one draft within a run.
///
/// Rendered to models as `Response A`, `Response B`, ...
///
/// # Example
///
/// ```
/// use council_domain::ranking::Label;
///
/// let label = Label::from_index(1).unwrap();
/// assert_eq!(label.letter(), 'B');
/// assert_eq!(label.to_string(), "Response B");
/// assert_eq!(Label::from_letter('b'), Some(label));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(char);

impl Label {
    /// Label for the `index`-th candidate (0-based).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < MAX_LABELS).then(|| Self((b'A' + index as u8) as char))
    }

    /// Label for a letter, case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper))
    }

    pub fn letter(&self) -> char {
        self.0
    }

    /// 0-based position in label order.
    pub fn index(&self) -> usize {
        (self.0 as u8 - b'A') as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response {}", self.0)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for Label {
    type Error = DomainError;

    /// Accepts `Response A` or a bare `A`.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let letter_part = trimmed
            .strip_prefix("Response")
            .map(str::trim)
            .unwrap_or(trimmed);
        let mut chars = letter_part.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Label::from_letter(c).ok_or_else(|| DomainError::InvalidInput(format!("invalid label: {value}")))
            }
            _ => Err(DomainError::InvalidInput(format!("invalid label: {value}"))),
        }
    }
}

/// One label-to-model pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub label: Label,
    pub model: Model,
}

/// Read-only bijection between labels and the models behind them.
///
/// Built once per run at ranking entry; labels follow the order in which
/// the drafts were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
    entries: Vec<LabelEntry>,
}

impl LabelMap {
    /// Assign `A`, `B`, ... to `models` in the given order.
    ///
    /// A model appearing twice would make the mapping ambiguous, so repeats
    /// are rejected.
    pub fn from_models<I>(models: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = Model>,
    {
        let models: Vec<Model> = models.into_iter().collect();
        if models.len() > MAX_LABELS {
            return Err(DomainError::TooManyCandidates(models.len()));
        }
        if let Some(dup) = models
            .iter()
            .enumerate()
            .find_map(|(i, m)| models[..i].iter().any(|p| p.as_str() == m.as_str()).then_some(m))
        {
            return Err(DomainError::DuplicateModel(dup.to_string()));
        }

        let entries = models
            .into_iter()
            .enumerate()
            .filter_map(|(i, model)| Label::from_index(i).map(|label| LabelEntry { label, model }))
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.entries.iter().map(|e| e.label)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.model_for(label).is_some()
    }

    pub fn model_for(&self, label: Label) -> Option<&Model> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.model)
    }

    pub fn label_for(&self, model: &Model) -> Option<Label> {
        self.entries
            .iter()
            .find(|e| &e.model == model)
            .map(|e| e.label)
    }

    /// Keep only labels in this map, first occurrence wins.
    pub fn normalize_ranking(&self, parsed: &[Label]) -> Vec<Label> {
        let mut out: Vec<Label> = Vec::with_capacity(parsed.len());
        for &label in parsed {
            if self.contains(label) && !out.contains(&label) {
                out.push(label);
            }
        }
        out
    }
}
