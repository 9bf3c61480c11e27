//! Heading detection and best-effort section extraction.
//!
//! Works on both markdown (`## Projects`, `**Projects**`) and plain-text
//! (`PROJECTS:`) documents.

use crate::outline::SectionSchema;

/// Header placed before sections re-appended after truncation.
pub const PINNED_HEADER: &str = "PINNED FROM TRUTH SOURCE:";

fn trim_trailing_punct(s: &str) -> &str {
    s.trim_end_matches(|c: char| matches!(c, ':' | '-' | '–' | '—') || c.is_whitespace())
}

/// Normalize a line for heading comparison.
///
/// Strips `#` markers, bold wrappers and trailing `:`/`-`/`–`/`—`, then
/// lowercases. Non-heading lines come back unchanged apart from case.
pub fn normalize_heading(line: &str) -> String {
    let mut s = line.trim();
    if s.starts_with('#') {
        s = s.trim_start_matches('#').trim();
    }
    s = trim_trailing_punct(s);
    if s.starts_with("**") || s.starts_with("__") {
        s = s.trim_matches(|c| c == '*' || c == '_').trim();
        s = trim_trailing_punct(s);
    }
    s.to_lowercase()
}

/// Extract a section by heading name.
///
/// Returns the heading line followed by every line up to (not including)
/// the next heading known to `schema`, trimmed. Returns an empty string when
/// the heading is not found.
pub fn extract_section(text: &str, schema: &SectionSchema, name: &str) -> String {
    let target = name.trim().to_lowercase();
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines
        .iter()
        .position(|line| normalize_heading(line) == target)
    else {
        return String::new();
    };

    let mut out = vec![lines[start].trim()];
    for line in &lines[start + 1..] {
        if schema.is_known_heading(&normalize_heading(line)) {
            break;
        }
        out.push(line.trim_end());
    }

    out.join("\n").trim().to_string()
}

/// Re-append sections that truncation removed.
///
/// Each name in `names` is extracted from the untruncated `original`. When
/// the packed text no longer mentions one of the extracted sections by name,
/// all extracted sections are appended in a delimited block. Names with
/// nothing to extract never trigger the append.
pub fn pin_sections(original: &str, packed: &str, schema: &SectionSchema, names: &[String]) -> String {
    let pinned: Vec<(&str, String)> = names
        .iter()
        .map(|name| (name.as_str(), extract_section(original, schema, name)))
        .filter(|(_, section)| !section.is_empty())
        .collect();

    if pinned.is_empty() {
        return packed.to_string();
    }

    let lower = packed.to_lowercase();
    let need_append = pinned
        .iter()
        .any(|(name, _)| !lower.contains(&name.to_lowercase()));
    if !need_append {
        return packed.to_string();
    }

    let blocks = pinned
        .into_iter()
        .map(|(_, section)| section)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{packed}\n\n---\n{PINNED_HEADER}\n{blocks}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::normalize::compact;

    const PROFILE: &str = "Jane Doe\n\nSummary\nBackend engineer.\n\n## Projects\n- **Ledger** | Rust | Settled 1M tx/day\n- **Atlas** | Go | Geo search\n\nCertifications:\n- AWS SA Pro\n\nEducation\nBSc CS";

    #[test]
    fn test_normalize_heading_variants() {
        assert_eq!(normalize_heading("## Projects"), "projects");
        assert_eq!(normalize_heading("  Certifications:  "), "certifications");
        assert_eq!(normalize_heading("**Technical Skills**"), "technical skills");
        assert_eq!(normalize_heading("**Summary:**"), "summary");
        assert_eq!(normalize_heading("Experience –"), "experience");
        assert_eq!(normalize_heading("- a bullet"), "- a bullet");
    }

    #[test]
    fn test_extract_section_stops_at_next_known_heading() {
        let schema = SectionSchema::resume();
        let projects = extract_section(PROFILE, &schema, "Projects");
        assert_eq!(
            projects,
            "## Projects\n- **Ledger** | Rust | Settled 1M tx/day\n- **Atlas** | Go | Geo search"
        );
        let certs = extract_section(PROFILE, &schema, "certifications");
        assert_eq!(certs, "Certifications:\n- AWS SA Pro");
    }

    #[test]
    fn test_extract_missing_section_is_empty() {
        let schema = SectionSchema::resume();
        assert_eq!(extract_section(PROFILE, &schema, "Publications"), "");
    }

    #[test]
    fn test_pin_when_truncation_drops_projects() {
        let schema = SectionSchema::resume();
        let original = format!("Summary\n{}\n\nProjects\n- **Atlas** | Rust", "x".repeat(400));
        let packed = compact(&original, 200);
        assert!(!packed.to_lowercase().contains("projects"));

        let pinned = pin_sections(&original, &packed, &schema, schema.recoverable_headings());
        let lower = pinned.to_lowercase();
        assert!(lower.contains("projects"));
        assert!(pinned.contains(PINNED_HEADER));
        assert!(pinned.ends_with("Projects\n- **Atlas** | Rust"));
    }

    #[test]
    fn test_no_pin_when_sections_survive() {
        let schema = SectionSchema::resume();
        let pinned = pin_sections(PROFILE, PROFILE, &schema, schema.recoverable_headings());
        assert_eq!(pinned, PROFILE);
    }

    #[test]
    fn test_unextractable_name_does_not_force_pin() {
        let schema = SectionSchema::resume();
        let original = "Summary\nBackend engineer.\n\nProjects\n- **Ledger** | Rust";
        let packed = "Summary\nBackend engineer.\n\nProjects\n- **Ledger**";
        let pinned = pin_sections(original, packed, &schema, schema.recoverable_headings());
        assert_eq!(pinned, packed);
    }

    #[test]
    fn test_no_pin_when_nothing_extracted() {
        let schema = SectionSchema::resume();
        let pinned = pin_sections("Summary\nshort", "Summary", &schema, schema.recoverable_headings());
        assert_eq!(pinned, "Summary");
    }
}
