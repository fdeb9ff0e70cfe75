//! Per-title score aggregation for the statistics view

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::Entry;

/// Aggregates for one distinct title in the filtered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleStats {
    pub title: String,
    pub attempts: usize,
    /// Mean of the present scores, rounded to one decimal; None when no
    /// attempt of this title carries a score
    pub mean_score: Option<f64>,
    pub max_score: Option<u32>,
}

/// Group rows by title and compute mean/max score per group, ordered by
/// mean descending.
///
/// Attempts whose score is missing contribute to the attempt count but
/// not to either aggregate. The sort is stable over the alphabetical
/// grouping order, so equal means keep a deterministic title order;
/// score-less groups sort last.
pub fn title_stats(rows: &[&Entry]) -> Vec<TitleStats> {
    let mut groups: BTreeMap<&str, Vec<&Entry>> = BTreeMap::new();
    for &entry in rows {
        groups.entry(entry.title.as_str()).or_default().push(entry);
    }

    let mut stats: Vec<TitleStats> = groups
        .into_iter()
        .map(|(title, entries)| {
            let scores: Vec<u32> = entries.iter().filter_map(|e| e.score).collect();
            let mean_score = if scores.is_empty() {
                None
            } else {
                let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
                Some((sum as f64 / scores.len() as f64 * 10.0).round() / 10.0)
            };

            TitleStats {
                title: title.to_string(),
                attempts: entries.len(),
                mean_score,
                max_score: scores.iter().copied().max(),
            }
        })
        .collect();

    stats.sort_by(|a, b| match (a.mean_score, b.mean_score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Genre;

    fn entry(title: &str, score: Option<u32>) -> Entry {
        Entry {
            title: title.to_string(),
            genre: Genre::JPop,
            score,
            memo: String::new(),
            registered_date: "2026-01-01".parse().unwrap(),
        }
    }

    #[test]
    fn test_mean_rounds_to_one_decimal() {
        let entries = [
            entry("A", Some(80)),
            entry("A", Some(95)),
            entry("A", Some(70)),
        ];
        let rows: Vec<&Entry> = entries.iter().collect();

        let stats = title_stats(&rows);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].attempts, 3);
        assert_eq!(stats[0].mean_score, Some(81.7));
        assert_eq!(stats[0].max_score, Some(95));
    }

    #[test]
    fn test_ordered_by_mean_descending() {
        let entries = [
            entry("Low", Some(40)),
            entry("High", Some(98)),
            entry("Mid", Some(70)),
        ];
        let rows: Vec<&Entry> = entries.iter().collect();

        let titles: Vec<String> = title_stats(&rows).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_equal_means_keep_alphabetical_order() {
        let entries = [entry("Zeta", Some(80)), entry("Alpha", Some(80))];
        let rows: Vec<&Entry> = entries.iter().collect();

        let titles: Vec<String> = title_stats(&rows).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_missing_scores_excluded_from_aggregates() {
        let entries = [entry("A", Some(90)), entry("A", None)];
        let rows: Vec<&Entry> = entries.iter().collect();

        let stats = title_stats(&rows);
        assert_eq!(stats[0].attempts, 2);
        assert_eq!(stats[0].mean_score, Some(90.0));
        assert_eq!(stats[0].max_score, Some(90));
    }

    #[test]
    fn test_scoreless_group_sorts_last() {
        let entries = [entry("NoScore", None), entry("Scored", Some(10))];
        let rows: Vec<&Entry> = entries.iter().collect();

        let stats = title_stats(&rows);
        assert_eq!(stats[0].title, "Scored");
        assert_eq!(stats[1].title, "NoScore");
        assert_eq!(stats[1].mean_score, None);
        assert_eq!(stats[1].max_score, None);
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(title_stats(&[]).is_empty());
    }
}
