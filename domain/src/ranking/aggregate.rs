//! Rank aggregation across rankers.

use super::label::{Label, LabelMap};
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// A candidate model's combined standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRanking {
    pub model: Model,
    /// Mean 1-indexed position across the orderings that include this model
    pub average_rank: f64,
    /// Number of orderings that include this model
    pub rankings_count: usize,
}

/// Combine several parsed orderings into one ranking.
///
/// For each labelled model the average rank is the mean of its 1-indexed
/// positions over only the orderings that contain it. Models no ordering
/// mentions are left out. Output is sorted by average rank ascending;
/// ties keep label order.
///
/// Labels missing from `labels` are ignored, and a label repeated within a
/// single ordering counts only at its first position.
pub fn aggregate<'a, I>(orderings: I, labels: &LabelMap) -> Vec<AggregateRanking>
where
    I: IntoIterator<Item = &'a [Label]>,
{
    // (sum of positions, count) per entry, indexed in label order
    let mut totals: Vec<(usize, usize)> = vec![(0, 0); labels.len()];

    for ordering in orderings {
        let mut seen: Vec<Label> = Vec::new();
        for (pos, &label) in ordering.iter().enumerate() {
            if seen.contains(&label) {
                continue;
            }
            seen.push(label);
            if let Some(idx) = labels.entries().iter().position(|e| e.label == label) {
                totals[idx].0 += pos + 1;
                totals[idx].1 += 1;
            }
        }
    }

    let mut out: Vec<AggregateRanking> = labels
        .entries()
        .iter()
        .zip(totals)
        .filter(|(_, (_, count))| *count > 0)
        .map(|(entry, (sum, count))| AggregateRanking {
            model: entry.model.clone(),
            average_rank: sum as f64 / count as f64,
            rankings_count: count,
        })
        .collect();

    // sort_by is stable, so equal averages stay in label order
    out.sort_by(|a, b| a.average_rank.total_cmp(&b.average_rank));
    out
}

/// Wrap one judge's ordering: position `i` becomes average rank `i`.
pub fn single_judge_aggregate(parsed: &[Label], labels: &LabelMap) -> Vec<AggregateRanking> {
    labels
        .normalize_ranking(parsed)
        .into_iter()
        .enumerate()
        .filter_map(|(i, label)| {
            labels.model_for(label).map(|model| AggregateRanking {
                model: model.clone(),
                average_rank: (i + 1) as f64,
                rankings_count: 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(c: char) -> Label {
        Label::from_letter(c).unwrap()
    }

    fn map() -> LabelMap {
        LabelMap::from_models([Model::Gpt51, Model::Gemini3Pro, Model::ClaudeSonnet45, Model::Grok4])
            .unwrap()
    }

    #[test]
    fn test_mean_of_positions() {
        let orderings = [
            vec![l('A'), l('B'), l('C')],
            vec![l('B'), l('A'), l('C')],
            vec![l('B'), l('C'), l('A')],
        ];
        let agg = aggregate(orderings.iter().map(Vec::as_slice), &map());

        assert_eq!(agg.len(), 3);
        assert_eq!(agg[0].model, Model::Gemini3Pro);
        assert!((agg[0].average_rank - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(agg[1].model, Model::Gpt51);
        assert!((agg[1].average_rank - 2.0).abs() < 1e-9);
        assert_eq!(agg[2].model, Model::ClaudeSonnet45);
        assert!((agg[2].average_rank - 8.0 / 3.0).abs() < 1e-9);
        assert!(agg.iter().all(|a| a.rankings_count == 3));
    }

    #[test]
    fn test_partial_orderings_average_only_where_present() {
        let orderings = [vec![l('C'), l('A')], vec![l('A')], vec![l('B'), l('D'), l('C')]];
        let agg = aggregate(orderings.iter().map(Vec::as_slice), &map());

        let c = agg.iter().find(|a| a.model == Model::ClaudeSonnet45).unwrap();
        assert_eq!(c.rankings_count, 2);
        assert!((c.average_rank - 2.0).abs() < 1e-9);
        let a = agg.iter().find(|a| a.model == Model::Gpt51).unwrap();
        assert!((a.average_rank - 1.5).abs() < 1e-9);
        let d = agg.iter().find(|a| a.model == Model::Grok4).unwrap();
        assert_eq!(d.rankings_count, 1);
    }

    #[test]
    fn test_unranked_models_are_absent() {
        let orderings = [vec![l('A'), l('B')]];
        let agg = aggregate(orderings.iter().map(Vec::as_slice), &map());
        assert_eq!(agg.len(), 2);
        assert!(!agg.iter().any(|a| a.model == Model::Grok4));
    }

    #[test]
    fn test_ties_keep_label_order() {
        let orderings = [vec![l('C'), l('A')], vec![l('A'), l('C')]];
        let agg = aggregate(orderings.iter().map(Vec::as_slice), &map());
        assert_eq!(agg[0].model, Model::Gpt51);
        assert_eq!(agg[1].model, Model::ClaudeSonnet45);
        assert_eq!(agg[0].average_rank, agg[1].average_rank);
    }

    #[test]
    fn test_unknown_and_repeated_labels() {
        let orderings = [vec![l('Z'), l('B'), l('B'), l('A')]];
        let agg = aggregate(orderings.iter().map(Vec::as_slice), &map());
        assert_eq!(agg[0].model, Model::Gemini3Pro);
        assert_eq!(agg[0].average_rank, 2.0);
        assert_eq!(agg[1].model, Model::Gpt51);
        assert_eq!(agg[1].average_rank, 4.0);
    }

    #[test]
    fn test_no_orderings() {
        let agg = aggregate(std::iter::empty::<&[Label]>(), &map());
        assert!(agg.is_empty());
    }

    #[test]
    fn test_single_judge_wrap() {
        let labels = LabelMap::from_models([Model::Gpt51, Model::Gemini3Pro]).unwrap();
        let agg = single_judge_aggregate(&[l('B'), l('A')], &labels);
        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].model, Model::Gemini3Pro);
        assert_eq!(agg[0].average_rank, 1.0);
        assert_eq!(agg[1].model, Model::Gpt51);
        assert_eq!(agg[1].average_rank, 2.0);
        assert!(agg.iter().all(|a| a.rankings_count == 1));
    }

    #[test]
    fn test_single_judge_skips_unknown_labels() {
        let labels = LabelMap::from_models([Model::Gpt51]).unwrap();
        let agg = single_judge_aggregate(&[l('C'), l('A'), l('A')], &labels);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].average_rank, 1.0);
    }
}
