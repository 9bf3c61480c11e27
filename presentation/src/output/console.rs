//! Console output formatter for deliberation results

use colored::Colorize;
use council_application::{RunRecord, RunSummary};
use council_domain::{DeliberationOutcome, DeliberationRun, NoContentReport};

/// Formats deliberation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome
    pub fn format(outcome: &DeliberationOutcome) -> String {
        match outcome {
            DeliberationOutcome::Completed(run) => Self::format_run(run),
            DeliberationOutcome::NoContent(report) => Self::format_no_content(report),
        }
    }

    fn format_run(run: &DeliberationRun) -> String {
        let meta = &run.metadata;
        let mut output = String::new();

        output.push_str(&Self::header("Draft Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Ranking:".cyan().bold(),
            meta.ranking_mode
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Responded:".cyan().bold(),
            Self::join(&meta.models_responded)
        ));
        if !meta.models_missing.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Missing:".red().bold(),
                Self::join(&meta.models_missing)
            ));
        }

        // Stage 1: Drafts
        output.push_str(&Self::section_header("Stage 1: Drafts"));
        for draft in &run.drafts {
            let label = meta
                .label_to_model
                .label_for(&draft.model)
                .map(|l| l.to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ({}) ──", label, draft.model).yellow().bold(),
                draft.text.trim_end()
            ));
        }

        // Stage 2: Rankings
        output.push_str(&Self::section_header("Stage 2: Rankings"));
        for ranking in &run.rankings {
            let order = ranking
                .parsed_labels
                .iter()
                .map(|l| l.letter().to_string())
                .collect::<Vec<_>>()
                .join(" > ");
            let order = if order.is_empty() {
                "(unparsed)".dimmed().to_string()
            } else {
                order
            };
            output.push_str(&format!("  {} {}\n", format!("{}:", ranking.model).bold(), order));
        }
        if !meta.aggregate_ranking.is_empty() {
            output.push_str(&format!("\n{}\n", "Aggregate:".cyan().bold()));
            for (pos, entry) in meta.aggregate_ranking.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} (avg {:.2} over {})\n",
                    pos + 1,
                    entry.model,
                    entry.average_rank,
                    entry.rankings_count
                ));
            }
        }

        // Stage 3: Final
        output.push_str(&Self::section_header("Stage 3: Final Document"));
        let note = if meta.refinement_applied {
            run.final_artifact.note.green()
        } else {
            run.final_artifact.note.normal()
        };
        output.push_str(&format!(
            "\n{} {}\n",
            format!("Model: {}", run.final_artifact.model).yellow().bold(),
            note
        ));
        output.push_str(&format!(
            "{}\n\n",
            format!(
                "selected via {}, score proxy {:.3}",
                meta.selection_strategy, meta.score_proxy
            )
            .dimmed()
        ));
        output.push_str(run.final_artifact.text.trim_end());
        output.push('\n');

        output.push_str(&Self::footer());
        output
    }

    fn format_no_content(report: &NoContentReport) -> String {
        format!(
            "{}\n{} {}\n",
            report.message.red().bold(),
            "Models requested:".dimmed(),
            Self::join(&report.models_requested)
        )
    }

    /// Final document only; suitable for redirecting to a file
    pub fn format_final_only(outcome: &DeliberationOutcome) -> String {
        match outcome.final_text() {
            Some(text) => text.to_string(),
            None => String::new(),
        }
    }

    /// Format as JSON
    pub fn format_json<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per stored run
    pub fn format_runs(runs: &[RunSummary]) -> String {
        if runs.is_empty() {
            return format!("{}\n", "No stored runs.".dimmed());
        }
        runs.iter()
            .map(|r| {
                let status = if r.completed { "done".green() } else { "empty".red() };
                let model = r
                    .final_model
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "{}  {}  {:<5}  {}  {}\n",
                    r.id.dimmed(),
                    r.created_at.format("%Y-%m-%d %H:%M"),
                    status,
                    model,
                    r.title.bold()
                )
            })
            .collect()
    }

    /// Where a run was saved
    pub fn format_saved(record: &RunRecord) -> String {
        format!("{} {}", "Saved run".dimmed(), record.id.cyan())
    }

    fn join<T: std::fmt::Display>(items: &[T]) -> String {
        if items.is_empty() {
            return "(none)".to_string();
        }
        items
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
