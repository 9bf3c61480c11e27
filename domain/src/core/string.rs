//! String utilities for the domain layer.
//!
//! All lengths here are counted in `char`s, so budgets never split a
//! multi-byte character.

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Take at most `max_chars` characters from the front of `s`
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string to `max_chars` characters with an ellipsis
///
/// The ellipsis counts toward the budget.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if char_len(s) <= max_chars {
        s.to_string()
    } else {
        let head = take_chars(s, max_chars.saturating_sub(3));
        format!("{}...", head.trim_end())
    }
}
