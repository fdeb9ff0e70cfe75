//! CSV reading and writing for the record table
//!
//! One header row naming the five fields in fixed column order, one record
//! per subsequent row, UTF-8, comma-delimited with standard quoting.

use std::path::Path;

use chrono::NaiveDate;

use super::{Entry, Genre};
use crate::{Error, Result};

const HEADER: [&str; 5] = ["title", "genre", "score", "memo", "registered_date"];

/// Read the full table from `path`
///
/// Score cells are numeric-coerced (unparseable values become the missing
/// sentinel), genre cells coerce to Other. Dates are system-written, so a
/// cell that does not parse fails the load instead of being guessed.
pub(super) fn read_table(path: &Path) -> Result<Vec<Entry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut table = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1, first record is line 2
        let line = index + 2;

        if record.len() != HEADER.len() {
            return Err(Error::MalformedFile(format!(
                "line {} has {} fields, expected {}",
                line,
                record.len(),
                HEADER.len()
            )));
        }

        let registered_date = NaiveDate::parse_from_str(&record[4], "%Y-%m-%d").map_err(|_| {
            Error::MalformedFile(format!(
                "line {}: bad registered_date {:?}",
                line, &record[4]
            ))
        })?;

        table.push(Entry {
            title: record[0].to_string(),
            genre: Genre::parse_lossy(&record[1]),
            score: coerce_score(&record[2]),
            memo: record[3].to_string(),
            registered_date,
        });
    }

    Ok(table)
}

/// Rewrite the full table at `path`
pub(super) fn write_table(path: &Path, table: &[Entry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(HEADER)?;

    for entry in table {
        let score = entry.score.map(|s| s.to_string()).unwrap_or_default();
        let date = entry.registered_date.format("%Y-%m-%d").to_string();
        writer.write_record([
            entry.title.as_str(),
            entry.genre.as_str(),
            score.as_str(),
            entry.memo.as_str(),
            date.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Coerce a score cell to a number; anything unparseable maps to the
/// missing sentinel rather than failing the load
fn coerce_score(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if let Ok(n) = cell.parse::<u32>() {
        return Some(n);
    }
    // Legacy files may carry float-formatted scores ("92.0")
    cell.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_score_integer() {
        assert_eq!(coerce_score("80"), Some(80));
        assert_eq!(coerce_score(" 100 "), Some(100));
        assert_eq!(coerce_score("0"), Some(0));
    }

    #[test]
    fn test_coerce_score_legacy_float() {
        assert_eq!(coerce_score("92.0"), Some(92));
        assert_eq!(coerce_score("81.7"), Some(82));
    }

    #[test]
    fn test_coerce_score_unparseable_is_missing() {
        assert_eq!(coerce_score(""), None);
        assert_eq!(coerce_score("abc"), None);
        assert_eq!(coerce_score("-5"), None);
        assert_eq!(coerce_score("NaN"), None);
    }
}
