//! CLI command definitions

use clap::{ArgGroup, Parser, ValueEnum};
use council_domain::RankingMode;
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Drafts, rankings, final document and metadata
    Full,
    /// Only the final document
    Final,
    /// The whole run as JSON
    Json,
}

/// CLI arguments for draft-council
#[derive(Parser, Debug)]
#[command(name = "draft-council")]
#[command(author, version, about = "Draft Council - Several models draft, rank and polish one document")]
#[command(long_about = r#"
Draft Council asks several models to write the same document, ranks the drafts
and returns the best one, polished when it looks weak.

The process has three stages:
1. Draft: every drafting model writes a document from the truth source
2. Rank: the anonymized drafts are ranked by their peers or by one judge
3. Finalize: the best draft is normalized to the required outline and
   polished once when it is incomplete, truncated or scores low

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables (e.g. COUNCIL_RANKING__MODE=judge)
2. --config <path>      Explicit config file
3. ./council.toml       Project-level config
4. ~/.config/draft-council/config.toml   Global config

Example:
  draft-council --truth profile.md --target job.txt
  draft-council --truth profile.md --target job.txt --judge -o final > cv.md
  draft-council --list-runs
"#)]
#[command(group(ArgGroup::new("mode").args(["judge", "peer"])))]
pub struct Cli {
    /// File with the authoritative source text
    #[arg(long, value_name = "FILE", required_unless_present_any = ["list_runs", "show_run", "show_config"])]
    pub truth: Option<PathBuf>,

    /// File with the target description the document is tailored to
    #[arg(long, value_name = "FILE", required_unless_present_any = ["list_runs", "show_run", "show_config"])]
    pub target: Option<PathBuf>,

    /// File with free-form context notes (tone, company details)
    #[arg(long, value_name = "FILE")]
    pub notes: Option<PathBuf>,

    /// Rank drafts with a single judge model
    #[arg(long)]
    pub judge: bool,

    /// Rank drafts by peer ranking across the ranking models
    #[arg(long)]
    pub peer: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Directory for run records
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Do not persist the run
    #[arg(long)]
    pub no_store: bool,

    /// List stored runs and exit
    #[arg(long)]
    pub list_runs: bool,

    /// Print a stored run and exit
    #[arg(long, value_name = "ID")]
    pub show_run: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Ranking mode forced by `--judge` / `--peer`, if any
    pub fn ranking_mode(&self) -> Option<RankingMode> {
        if self.judge {
            Some(RankingMode::SingleJudge)
        } else if self.peer {
            Some(RankingMode::PeerRanking)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from([
            "draft-council",
            "--truth",
            "profile.md",
            "--target",
            "job.txt",
            "--judge",
            "-o",
            "final",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.truth, Some(PathBuf::from("profile.md")));
        assert_eq!(cli.ranking_mode(), Some(RankingMode::SingleJudge));
        assert_eq!(cli.output, OutputFormat::Final);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_inputs_required_for_a_run() {
        assert!(Cli::try_parse_from(["draft-council", "--truth", "a.md"]).is_err());
        assert!(Cli::try_parse_from(["draft-council", "--list-runs"]).is_ok());
    }

    #[test]
    fn test_judge_and_peer_conflict() {
        let result = Cli::try_parse_from([
            "draft-council",
            "--truth",
            "a",
            "--target",
            "b",
            "--judge",
            "--peer",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_mode_flag_defers_to_config() {
        let cli = Cli::try_parse_from(["draft-council", "--truth", "a", "--target", "b"]).unwrap();
        assert_eq!(cli.ranking_mode(), None);
        assert_eq!(cli.output, OutputFormat::Full);
    }
}
