//! Deliberation domain entities

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stage of a deliberation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Every drafting model writes a candidate
    Draft,
    /// Candidates are ranked anonymously
    Rank,
    /// The best candidate is selected, normalized and maybe polished
    Finalize,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Draft => "draft",
            Stage::Rank => "rank",
            Stage::Finalize => "finalize",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Draft => "Drafting",
            Stage::Rank => "Ranking",
            Stage::Finalize => "Finalizing",
        }
    }

    pub fn all() -> [Stage; 3] {
        [Stage::Draft, Stage::Rank, Stage::Finalize]
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How the drafts are ranked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Every ranking model orders the anonymized drafts; orderings are averaged
    #[default]
    PeerRanking,
    /// One judge model orders the drafts with code-computed heuristics in view
    SingleJudge,
}

impl RankingMode {
    pub fn as_str(&self) -> &str {
        match self {
            RankingMode::PeerRanking => "peer_ranking",
            RankingMode::SingleJudge => "single_judge",
        }
    }

    pub fn is_peer(&self) -> bool {
        matches!(self, RankingMode::PeerRanking)
    }
}

impl std::fmt::Display for RankingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "peer" | "peer_ranking" => Ok(RankingMode::PeerRanking),
            "judge" | "single_judge" => Ok(RankingMode::SingleJudge),
            other => Err(format!("unknown ranking mode: {other}")),
        }
    }
}
