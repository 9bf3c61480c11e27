//! Ranking: anonymous labels, free-text ranking parsing and aggregation.

pub mod aggregate;
pub mod label;
pub mod parsing;

pub use aggregate::{AggregateRanking, aggregate, single_judge_aggregate};
pub use label::{Label, LabelEntry, LabelMap, MAX_LABELS};
pub use parsing::parse_ranking;
