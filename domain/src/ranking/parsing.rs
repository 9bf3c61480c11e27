//! Ranking response parsing.
//!
//! Rankers answer in free text and are asked to finish with a block like:
//!
//! ```text
//! FINAL RANKING:
//! 1. Response B
//! 2. Response A
//! ```
//!
//! Parsing is total: anything unrecognizable yields an empty list.

use super::label::Label;
use regex::Regex;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)final\s+ranking").unwrap());

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*[*_]*\d+[ \t]*[.)][ \t]*[*_]*[ \t]*(?i:response)[ \t]+([A-Z])(?:[^A-Za-z0-9]|$)").unwrap()
});

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:response)\s+([A-Z])(?:[^A-Za-z0-9]|$)").unwrap());

fn captured_labels(re: &Regex, text: &str) -> Vec<Label> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().chars().next())
        .filter_map(Label::from_letter)
        .collect()
}

/// Labels named in one marker segment: numbered items if any, else mentions.
fn segment_labels(segment: &str) -> Vec<Label> {
    let numbered = captured_labels(&NUMBERED_ITEM, segment);
    if !numbered.is_empty() {
        return numbered;
    }
    captured_labels(&MENTION, segment)
}

/// Parse the final ordering out of a ranking response.
///
/// The text is cut into segments at each `FINAL RANKING` marker (any case).
/// Segments are tried from the last marker backwards, and the first one that
/// names a response wins, so commentary that repeats the phrase after the
/// list does not hide it. Within a segment, numbered items (`1.` or `1)`,
/// optionally bold) referencing `Response <letter>` are preferred; without
/// any, every `Response <letter>` mention is taken in order. No marker means
/// no ranking.
///
/// Labels are returned as found. Filtering against the run's labels and
/// deduplication happen in [`LabelMap::normalize_ranking`].
///
/// [`LabelMap::normalize_ranking`]: super::label::LabelMap::normalize_ranking
///
/// # Examples
///
/// ```
/// use council_domain::ranking::{Label, parse_ranking};
///
/// let parsed = parse_ranking("B is better.\n\nFINAL RANKING:\n1. Response B\n2. Response A");
/// let letters: Vec<char> = parsed.iter().map(Label::letter).collect();
/// assert_eq!(letters, vec!['B', 'A']);
///
/// assert!(parse_ranking("I like Response A best").is_empty());
/// ```
pub fn parse_ranking(raw: &str) -> Vec<Label> {
    let markers: Vec<_> = MARKER.find_iter(raw).collect();
    for (i, marker) in markers.iter().enumerate().rev() {
        let end = markers.get(i + 1).map_or(raw.len(), |next| next.start());
        let labels = segment_labels(&raw[marker.end()..end]);
        if !labels.is_empty() {
            return labels;
        }
    }
    Vec::new()
}
