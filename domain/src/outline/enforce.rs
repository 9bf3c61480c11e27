//! Outline enforcement: rebuild generated text into the schema's layout.

use super::schema::SectionSchema;
use crate::core::string::truncate;
use crate::pack::sections::extract_section;
use std::collections::HashMap;

/// Non-empty lines taken from the truth source when backfilling a section.
const RECOVERED_LINES: usize = 3;
/// Longest recovered line kept verbatim.
const MAX_RECOVERED_LINE_CHARS: usize = 180;

/// Split text into required sections.
///
/// Lines before the first required heading are dropped; a heading that
/// appears twice accumulates both bodies.
fn split_sections<'a>(text: &'a str, schema: &'a SectionSchema) -> HashMap<&'a str, Vec<&'a str>> {
    let mut sections: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut current: Option<&str> = None;

    for line in text.lines() {
        if let Some(heading) = schema.match_required(line) {
            sections.entry(heading).or_default();
            current = Some(heading);
            continue;
        }
        if let Some(heading) = current {
            sections.entry(heading).or_default().push(line.trim_end());
        }
    }

    sections
}

/// Whether a body carries no real content (blank, or just the sentinel).
fn is_effectively_empty(lines: &[String], sentinel: &str) -> bool {
    let content = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    content.is_empty() || content.eq_ignore_ascii_case(sentinel)
}

/// Normalize bullet markers and clamp long lines.
fn coerce_bullets(lines: &[&str], max_lines: usize) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| {
            let line = if let Some(rest) = l.strip_prefix('•') {
                format!("- {}", rest.trim())
            } else if l.starts_with('*') && !l.starts_with("**") {
                format!("- {}", l.trim_start_matches('*').trim())
            } else {
                l.to_string()
            };
            truncate(&line, MAX_RECOVERED_LINE_CHARS)
        })
        .take(max_lines)
        .collect()
}

/// Pull a section body out of the truth source.
fn recover_from_truth(truth_source: &str, schema: &SectionSchema, heading: &str) -> Vec<String> {
    let extracted = extract_section(truth_source, schema, heading);
    let body: Vec<&str> = extracted.lines().skip(1).collect();
    coerce_bullets(&body, RECOVERED_LINES)
}

fn is_artifact_line(line: &str) -> bool {
    matches!(line.trim(), "**" | "*")
}

/// Enforce the schema's outline on generated text.
///
/// Every required heading is emitted exactly once, in schema order, each
/// followed by a non-empty body. Missing sections get the sentinel;
/// recoverable sections that are empty are backfilled from `truth_source`
/// when it has them. Output ends with a single newline.
///
/// # Example
///
/// ```
/// use council_domain::outline::{SectionSchema, enforce_outline};
///
/// let schema = SectionSchema::new(["Intro", "Body"]);
/// let out = enforce_outline("## Body\nhello", "", &schema);
/// assert_eq!(out, "Intro\nN/A\n\nBody\nhello\n");
/// ```
pub fn enforce_outline(text: &str, truth_source: &str, schema: &SectionSchema) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let split = split_sections(&normalized, schema);
    let sentinel = schema.sentinel();

    let mut rebuilt: Vec<String> = Vec::new();
    for heading in schema.required_headings() {
        let mut body: Vec<String> = split
            .get(heading.as_str())
            .map(|lines| lines.iter().map(|l| l.to_string()).collect())
            .unwrap_or_default();

        if schema.is_recoverable(heading) && is_effectively_empty(&body, sentinel) {
            body = recover_from_truth(truth_source, schema, heading);
        }

        body.retain(|l| !is_artifact_line(l));
        while body.first().is_some_and(|l| l.trim().is_empty()) {
            body.remove(0);
        }
        while body.last().is_some_and(|l| l.trim().is_empty()) {
            body.pop();
        }
        if is_effectively_empty(&body, "") {
            body = vec![sentinel.to_string()];
        }

        rebuilt.push(heading.clone());
        rebuilt.extend(body);
        rebuilt.push(String::new());
    }

    format!("{}\n", rebuilt.join("\n").trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::sections::normalize_heading;

    fn heading_positions(out: &str, schema: &SectionSchema) -> Vec<(String, usize)> {
        out.lines()
            .enumerate()
            .filter_map(|(i, l)| schema.match_required(l).map(|h| (h.to_string(), i)))
            .collect()
    }

    fn assert_outline_invariant(out: &str, schema: &SectionSchema) {
        let positions = heading_positions(out, schema);
        let names: Vec<&str> = positions.iter().map(|(h, _)| h.as_str()).collect();
        let expected: Vec<&str> = schema.required_headings().iter().map(String::as_str).collect();
        assert_eq!(names, expected, "headings out of order or duplicated:\n{out}");

        let lines: Vec<&str> = out.lines().collect();
        for (_, idx) in positions {
            let next = lines.get(idx + 1).copied().unwrap_or("");
            assert!(!next.trim().is_empty(), "empty body after line {idx}:\n{out}");
            assert!(schema.match_required(next).is_none());
        }
    }

    #[test]
    fn test_complete_draft_is_reordered() {
        let schema = SectionSchema::resume();
        let draft = "Jane Doe\n## Education\nBSc\n## Summary\nEngineer.\n## Technical Skills\nRust\n## Professional Experience\n- Acme\n## Projects\n- **X**\n## Certifications\n- AWS";
        let out = enforce_outline(draft, "", &schema);
        assert!(out.starts_with("Summary\nEngineer.\n\nEducation\nBSc\n"));
        assert!(!out.contains("Jane Doe"));
        assert!(out.ends_with("Certifications\n- AWS\n"));
        assert_outline_invariant(&out, &schema);
    }

    #[test]
    fn test_missing_sections_get_sentinel() {
        let schema = SectionSchema::resume();
        let out = enforce_outline("Summary\nOnly a summary.", "", &schema);
        assert!(out.contains("Education\nN/A"));
        assert!(out.contains("Professional Experience\nN/A"));
        assert_outline_invariant(&out, &schema);
    }

    #[test]
    fn test_recoverable_section_backfilled_from_truth() {
        let schema = SectionSchema::resume();
        let truth = "Projects\n• Ledger | Rust | Settled payments\n* Atlas | Go | Geo search\n- Third\n- Fourth\nCertifications\n- CKA";
        let draft = "Summary\nx\nProjects\nN/A\nCertifications\n";
        let out = enforce_outline(draft, truth, &schema);
        assert!(out.contains(
            "Projects\n- Ledger | Rust | Settled payments\n- Atlas | Go | Geo search\n- Third\n\nCertifications\n- CKA\n"
        ));
        assert!(!out.contains("Fourth"));
        assert_outline_invariant(&out, &schema);
    }

    #[test]
    fn test_recovery_falls_back_to_sentinel() {
        let schema = SectionSchema::resume();
        let out = enforce_outline("Projects\n\n", "no sections here", &schema);
        assert!(out.contains("Projects\nN/A"));
    }

    #[test]
    fn test_recovered_long_lines_clamped() {
        let schema = SectionSchema::resume();
        let truth = format!("Projects\n- {}", "y".repeat(300));
        let out = enforce_outline("", &truth, &schema);
        let line = out
            .lines()
            .find(|l| l.starts_with("- y"))
            .expect("recovered line present");
        assert_eq!(line.chars().count(), 180);
        assert!(line.ends_with("..."));
    }

    #[test]
    fn test_artifact_lines_and_blank_edges_removed() {
        let schema = SectionSchema::new(["Summary", "Skills"]);
        let out = enforce_outline("Summary\n\n\nGood.\n**\n\nSkills\n*\n", "", &schema);
        assert_eq!(out, "Summary\nGood.\n\nSkills\nN/A\n");
    }

    #[test]
    fn test_duplicate_headings_merge() {
        let schema = SectionSchema::new(["A", "B"]);
        let out = enforce_outline("A\none\nB\ntwo\nA\nthree", "", &schema);
        assert_eq!(out, "A\none\nthree\n\nB\ntwo\n");
    }

    #[test]
    fn test_invariant_holds_for_arbitrary_inputs() {
        let schema = SectionSchema::resume();
        let inputs = [
            "",
            "   \n\n",
            "random prose without structure",
            "**",
            "# Summary\n# Summary\n# Summary",
            "Certifications\nProjects\nSummary",
            "Summary:\n**\n*\n\nEducation —\n\n",
        ];
        for input in inputs {
            let out = enforce_outline(input, "", &schema);
            assert_outline_invariant(&out, &schema);
            assert!(out.ends_with('\n'));
            assert!(!out.ends_with("\n\n"));
        }
    }

    #[test]
    fn test_heading_lines_are_canonical() {
        let schema = SectionSchema::new(["Technical Skills"]);
        let out = enforce_outline("### technical skills:\nRust", "", &schema);
        let first = out.lines().next().unwrap();
        assert_eq!(first, "Technical Skills");
        assert_eq!(normalize_heading(first), "technical skills");
    }
}
