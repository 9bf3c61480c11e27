//! Keyword extraction for target descriptions.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z][a-z0-9+.#/-]+").unwrap());

const STOPWORDS: &[&str] = &[
    "the", "and", "or", "to", "of", "in", "for", "a", "an", "on", "with", "as", "at", "by", "is",
    "are", "be", "this", "that", "you", "we", "our", "your", "from", "will", "must", "should",
    "can", "may", "have", "has", "had", "i", "me", "my", "their", "they", "it", "its", "into",
    "over", "within", "across", "etc",
];

/// Extract up to `max_keywords` salient keywords from `text`.
///
/// Tokens are lowercase runs starting with a letter and continuing with
/// letters, digits or `+.#/-` (so `c++`, `node.js` and `ci/cd` survive).
/// Stopwords are dropped. Ranking is by frequency, then token length, both
/// descending; equal keys keep first-occurrence order.
///
/// # Examples
///
/// ```
/// use council_domain::pack::extract_keywords;
///
/// let kws = extract_keywords("Rust and Rust and Kubernetes", 10);
/// assert_eq!(kws, vec!["rust", "kubernetes"]);
/// ```
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let lower = text.to_lowercase();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in TOKEN.find_iter(&lower) {
        let token = m.as_str();
        if token.chars().count() < 2 || STOPWORDS.contains(&token) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order among ties
    order.sort_by(|a, b| {
        let key_a = (counts[a], a.chars().count());
        let key_b = (counts[b], b.chars().count());
        key_b.cmp(&key_a)
    });

    order
        .into_iter()
        .take(max_keywords)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_then_length() {
        let text = "python sql python aws sql python kubernetes";
        assert_eq!(
            extract_keywords(text, 10),
            vec!["python", "sql", "kubernetes", "aws"]
        );
    }

    #[test]
    fn test_stopwords_and_case() {
        let text = "The Team WILL build APIs for the platform";
        let kws = extract_keywords(text, 10);
        assert!(!kws.contains(&"the".to_string()));
        assert!(!kws.contains(&"will".to_string()));
        assert!(!kws.contains(&"for".to_string()));
        assert!(kws.contains(&"apis".to_string()));
        assert!(kws.iter().all(|k| k == &k.to_lowercase()));
    }

    #[test]
    fn test_symbol_tokens_survive() {
        let kws = extract_keywords("C++ and Node.js with CI/CD; C# too", 10);
        assert!(kws.contains(&"c++".to_string()));
        assert!(kws.contains(&"node.js".to_string()));
        assert!(kws.contains(&"ci/cd".to_string()));
        assert!(kws.contains(&"c#".to_string()));
    }

    #[test]
    fn test_single_characters_dropped() {
        let kws = extract_keywords("a b c rust", 10);
        assert_eq!(kws, vec!["rust"]);
    }

    #[test]
    fn test_cap_and_dedup() {
        let text = "alpha beta gamma delta alpha beta";
        let kws = extract_keywords(text, 2);
        assert_eq!(kws, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_keywords("", 40).is_empty());
    }
}
