//! Per-title score-over-time series for the trend charts

use chrono::NaiveDate;
use serde::Serialize;

use crate::store::Entry;

/// One plotted attempt; the score may be missing for coerced legacy rows
/// (such points still count toward the series threshold but are skipped
/// when drawing)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub score: Option<u32>,
}

/// Date-ascending score series for one title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub title: String,
    pub points: Vec<TrendPoint>,
}

/// Build one series per title appearing at least twice in the filtered
/// rows, in first-appearance title order. A single attempt cannot show a
/// trend, so such titles are skipped entirely.
///
/// Same-date attempts stay separate points in stable insertion order; no
/// deduplication or averaging.
pub fn trend_series(rows: &[&Entry]) -> Vec<TrendSeries> {
    let mut titles: Vec<&str> = Vec::new();
    for entry in rows {
        if !titles.contains(&entry.title.as_str()) {
            titles.push(entry.title.as_str());
        }
    }

    titles
        .into_iter()
        .filter_map(|title| {
            let mut points: Vec<TrendPoint> = rows
                .iter()
                .filter(|e| e.title == title)
                .map(|e| TrendPoint {
                    date: e.registered_date,
                    score: e.score,
                })
                .collect();

            if points.len() < 2 {
                return None;
            }

            points.sort_by_key(|p| p.date);
            Some(TrendSeries {
                title: title.to_string(),
                points,
            })
        })
        .collect()
}
