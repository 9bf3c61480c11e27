//! Whitespace normalization and budget-bounded compaction.

use crate::core::string::{char_len, take_chars};
use regex::Regex;
use std::sync::LazyLock;

/// Marker appended to text cut down by [`compact`].
pub const TRUNCATION_MARKER: &str = "[TRUNCATED FOR BUDGET]";

/// Characters held back from the budget when truncating.
pub const TRUNCATION_RESERVE: usize = 120;

static HORIZONTAL_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize raw text.
///
/// Line endings become `\n`, runs of spaces/tabs become one space, three or
/// more consecutive newlines collapse to a single blank line, and the result
/// is trimmed. Idempotent.
pub fn normalize(text: &str) -> String {
    let t = text.trim().replace("\r\n", "\n").replace('\r', "\n");
    let t = HORIZONTAL_WS.replace_all(&t, " ");
    let t = BLANK_RUNS.replace_all(&t, "\n\n");
    t.trim().to_string()
}

/// Normalize, then hard-truncate to fit `max_chars`.
///
/// Text that already fits is returned normalized. Otherwise the first
/// `max_chars - 120` characters are kept, trailing whitespace is dropped and
/// [`TRUNCATION_MARKER`] is appended on its own paragraph. A budget too
/// small to hold the marker gets a plain cut instead, so the output never
/// exceeds `max_chars`.
pub fn compact(text: &str, max_chars: usize) -> String {
    let t = normalize(text);
    if char_len(&t) <= max_chars {
        return t;
    }

    let head = take_chars(&t, max_chars.saturating_sub(TRUNCATION_RESERVE)).trim_end();
    if !head.is_empty() {
        format!("{head}\n\n{TRUNCATION_MARKER}")
    } else if char_len(TRUNCATION_MARKER) <= max_chars {
        TRUNCATION_MARKER.to_string()
    } else {
        take_chars(&t, max_chars).trim_end().to_string()
    }
}
