//! Prompt templates for the deliberation flow

use crate::outline::{HeuristicScore, SectionSchema};
use crate::pack::TargetPack;
use crate::ranking::Label;

/// Guidance prepended to every prompt.
pub const DEFAULT_STYLE_GUIDE: &str = r#"You are an expert writer of tailored professional documents.

Hard formatting rules:
- Tone: action-verb based. Never use first-person pronouns (I/me/my).
- Summary: 2-3 sentences at most. No narrative storytelling.
- Bullets: short and punchy, 1-2 lines each.
- Experience: 3-4 bullets per role.
- Projects: only the 2-3 most relevant; each is one line: **Project Name** | Tech Stack | one-sentence outcome.
- No tables or graphics.

Truth and metrics guardrails:
- Do NOT invent facts.
- Only include exact metrics (%, counts, time saved) if they appear verbatim in the truth source or target.
- If unsure, use qualitative wording."#;

/// Suffix that pins rankers to a parseable ending.
pub const STRICT_RANKING_SUFFIX: &str =
    "IMPORTANT: End with a section exactly:\nFINAL RANKING:\n1. Response A\n2. Response B\n...";

/// Shared inputs of every prompt in one run
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub truth_pack: &'a str,
    pub target: &'a TargetPack,
    pub context_notes: &'a str,
    /// User guidance appended to [`DEFAULT_STYLE_GUIDE`]
    pub style_guide: Option<&'a str>,
    pub schema: &'a SectionSchema,
}

impl PromptContext<'_> {
    fn target_block(&self) -> String {
        format!(
            "{}\n\nKEYWORDS: {}",
            self.target.text(),
            self.target.keywords().join(", ")
        )
    }

    fn context_notes_or_none(&self) -> &str {
        let trimmed = self.context_notes.trim();
        if trimmed.is_empty() { "(none)" } else { trimmed }
    }
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Style guidance, with the user's guide marked authoritative.
    pub fn style_block(custom: Option<&str>) -> String {
        match custom.map(str::trim).filter(|g| !g.is_empty()) {
            Some(guide) => format!("{DEFAULT_STYLE_GUIDE}\n\n---\nCUSTOM STRATEGY DOC (authoritative):\n{guide}"),
            None => DEFAULT_STYLE_GUIDE.to_string(),
        }
    }

    fn labeled_blocks(drafts: &[(Label, &str)]) -> String {
        drafts
            .iter()
            .map(|(label, text)| format!("{label}:\n{text}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Draft stage prompt
    pub fn draft_prompt(ctx: &PromptContext<'_>) -> String {
        let sentinel = ctx.schema.sentinel();
        format!(
            r#"{style}

Produce a concise document in strict markdown with these exact sections and order.

Hard rule: NEVER omit any of these headings. If a section has no items, keep the heading and put "{sentinel}" on the next line.

{headings}

Formatting rules:
- Use short, impact bullets; no fluff; no invented facts.
- Bold project names.
- Section headings exactly as above.
- Keep content truthful to the TRUTH SOURCE.

TRUTH SOURCE:
{truth}

TARGET DESCRIPTION:
{target}

CONTEXT NOTES (tone/culture hints):
{notes}

Return only the document markdown, nothing else."#,
            style = Self::style_block(ctx.style_guide),
            headings = ctx.schema.required_headings().join("\n"),
            truth = ctx.truth_pack,
            target = ctx.target_block(),
            notes = ctx.context_notes_or_none(),
        )
    }

    /// Peer ranking prompt over anonymized drafts
    pub fn peer_ranking_prompt(ctx: &PromptContext<'_>, drafts: &[(Label, &str)]) -> String {
        format!(
            r#"{style}

You are ranking tailored documents written for a target.

TRUTH SOURCE:
{truth}

TARGET REQUIREMENTS:
{target}

Documents (anonymized):
{blocks}

Evaluate each document on:
- Keyword coverage against the target
- Relevance and alignment to the target
- Truthfulness to the truth source (no invented claims)
- Formatting and clarity

Provide brief feedback per document. Then give FINAL RANKING as a numbered list using only the labels (e.g., "1. Response A").

{STRICT_RANKING_SUFFIX}"#,
            style = Self::style_block(ctx.style_guide),
            truth = ctx.truth_pack,
            target = ctx.target_block(),
            blocks = Self::labeled_blocks(drafts),
        )
    }

    /// Render per-label heuristics for the judge.
    pub fn heuristics_block(scores: &[(Label, &HeuristicScore)]) -> String {
        scores
            .iter()
            .map(|(label, s)| {
                format!(
                    "{label}: keyword_hit_rate={}, section_completeness={}, length_chars={}, keyword_hits=[{}]",
                    s.keyword_hit_rate,
                    s.section_completeness,
                    s.length_chars,
                    s.keyword_hits.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Single-judge prompt with code-computed heuristics in view
    pub fn judge_prompt(
        ctx: &PromptContext<'_>,
        drafts: &[(Label, &str)],
        scores: &[(Label, &HeuristicScore)],
    ) -> String {
        format!(
            r#"{style}

You are judging anonymized documents written for a specific target.

TRUTH SOURCE:
{truth}

TARGET REQUIREMENTS:
{target}

Cheap heuristics (computed by code):
{heuristics}

Documents:
{blocks}

Task:
1) Score each document 0-100 on: keyword_coverage, role_relevance, truthfulness, formatting.
2) Give short notes per document and list any unsupported claims.
3) End with a FINAL RANKING section formatted exactly:
FINAL RANKING:
1. Response A
2. Response B"#,
            style = Self::style_block(ctx.style_guide),
            truth = ctx.truth_pack,
            target = ctx.target_block(),
            heuristics = Self::heuristics_block(scores),
            blocks = Self::labeled_blocks(drafts),
        )
    }

    /// Polish prompt for the selected draft
    pub fn polish_prompt(ctx: &PromptContext<'_>, draft: &str) -> String {
        format!(
            r#"{style}

Polish this document for the target while staying 100% truthful to the truth source.

TRUTH SOURCE:
{truth}

TARGET REQUIREMENTS:
{target}

CONTEXT NOTES:
{notes}

DRAFT (markdown):
{draft}

Rules:
- Keep the same required sections: {headings}
- Bullet points only under experience/projects.
- Bold project names.
- Do NOT invent facts.

Return only the improved document markdown."#,
            style = Self::style_block(ctx.style_guide),
            truth = ctx.truth_pack,
            target = ctx.target_block(),
            notes = ctx.context_notes_or_none(),
            headings = ctx.schema.required_headings().join(", "),
        )
    }
}
