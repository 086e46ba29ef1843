//! Review file loading: delimited text via `csv`, spreadsheets via
//! `calamine`. Column matching is case-insensitive on header names.

use crate::data::Review;
use crate::error::{AnalysisError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::{info, warn};
use std::collections::HashSet;
use std::path::Path;

const REVIEWER_COLUMN: &str = "reviewer";
const TITLE_COLUMN: &str = "title";
const BODY_COLUMN: &str = "body";
const TIMESTAMP_COLUMN: &str = "timestamp";

/// Load reviews from a `.csv` or `.xlsx` file.
///
/// Validates required columns up front, drops exact duplicates, and
/// optionally caps the row count. Rows with an unparseable timestamp keep
/// `None` and are logged, not dropped.
pub fn load_reviews(path: &Path, sample_limit: Option<usize>) -> Result<Vec<Review>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let reviews = match extension.as_str() {
        "csv" => load_csv(path, sample_limit)?,
        "xlsx" | "xls" => load_spreadsheet(path, sample_limit)?,
        other => {
            return Err(AnalysisError::DataValidation(format!(
                "unsupported file format: {other:?} (expected .csv or .xlsx)"
            )));
        }
    };

    if reviews.is_empty() {
        return Err(AnalysisError::DataValidation(
            "input file contains no review rows".to_string(),
        ));
    }

    info!("Loaded {} reviews from {:?}", reviews.len(), path);
    Ok(reviews)
}

fn load_csv(path: &Path, sample_limit: Option<usize>) -> Result<Vec<Review>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let columns = resolve_columns(&headers)?;

    let mut reviews = Vec::new();
    let mut seen = HashSet::new();
    for (row_idx, record) in reader.records().enumerate() {
        if let Some(limit) = sample_limit {
            if reviews.len() >= limit {
                break;
            }
        }

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable row {}: {}", row_idx + 1, e);
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        push_row(
            &mut reviews,
            &mut seen,
            field(columns.reviewer),
            field(columns.title),
            field(columns.body),
            &field(columns.timestamp),
            row_idx,
        );
    }

    Ok(reviews)
}

fn load_spreadsheet(path: &Path, sample_limit: Option<usize>) -> Result<Vec<Review>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AnalysisError::DataValidation("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AnalysisError::DataValidation(format!("cannot read sheet: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| AnalysisError::DataValidation("workbook sheet is empty".to_string()))?
        .iter()
        .map(|cell| cell_text(cell).trim().to_lowercase())
        .collect();
    let columns = resolve_columns(&headers)?;

    let mut reviews = Vec::new();
    let mut seen = HashSet::new();
    for (row_idx, row) in rows.enumerate() {
        if let Some(limit) = sample_limit {
            if reviews.len() >= limit {
                break;
            }
        }

        let field = |idx: usize| {
            row.get(idx)
                .map(cell_text)
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        push_row(
            &mut reviews,
            &mut seen,
            field(columns.reviewer),
            field(columns.title),
            field(columns.body),
            &field(columns.timestamp),
            row_idx,
        );
    }

    Ok(reviews)
}

struct ColumnIndices {
    reviewer: usize,
    title: usize,
    body: usize,
    timestamp: usize,
}

fn resolve_columns(headers: &[String]) -> Result<ColumnIndices> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    let mut missing = Vec::new();
    let reviewer = find(REVIEWER_COLUMN);
    let title = find(TITLE_COLUMN);
    let body = find(BODY_COLUMN);
    let timestamp = find(TIMESTAMP_COLUMN);

    for (idx, name) in [
        (&reviewer, REVIEWER_COLUMN),
        (&title, TITLE_COLUMN),
        (&body, BODY_COLUMN),
        (&timestamp, TIMESTAMP_COLUMN),
    ] {
        if idx.is_none() {
            missing.push(name);
        }
    }

    if !missing.is_empty() {
        return Err(AnalysisError::DataValidation(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    Ok(ColumnIndices {
        reviewer: reviewer.unwrap(),
        title: title.unwrap(),
        body: body.unwrap(),
        timestamp: timestamp.unwrap(),
    })
}

fn push_row(
    reviews: &mut Vec<Review>,
    seen: &mut HashSet<(String, String, String)>,
    reviewer: String,
    title: String,
    body: String,
    timestamp_raw: &str,
    row_idx: usize,
) {
    if title.is_empty() && body.is_empty() {
        warn!("Skipping row {}: no review text", row_idx + 1);
        return;
    }

    // Exact duplicates carry no extra signal.
    let dedup_key = (reviewer.clone(), title.clone(), body.clone());
    if !seen.insert(dedup_key) {
        return;
    }

    let timestamp = parse_timestamp(timestamp_raw);
    if timestamp.is_none() && !timestamp_raw.is_empty() {
        warn!(
            "Row {}: unparseable timestamp {:?}, trend data will exclude it",
            row_idx + 1,
            timestamp_raw
        );
    }

    reviews.push(Review::new(reviewer, title, body, timestamp));
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_csv() {
        let file = write_csv(
            "reviewer,title,body,timestamp\n\
             alice,Great,Works perfectly,2024-05-01\n\
             bob,Meh,Too loud for me,2024-05-02\n",
        );
        let reviews = load_reviews(file.path(), None).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].reviewer, "alice");
        assert!(reviews[0].timestamp.is_some());
    }

    #[test]
    fn test_missing_column_fails_before_analysis() {
        let file = write_csv("reviewer,title,body\nalice,Great,Works\n");
        let err = load_reviews(file.path(), None).unwrap_err();
        assert!(matches!(err, AnalysisError::DataValidation(_)));
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn test_empty_file_fails() {
        let file = write_csv("reviewer,title,body,timestamp\n");
        let err = load_reviews(file.path(), None).unwrap_err();
        assert!(matches!(err, AnalysisError::DataValidation(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let err = load_reviews(file.path(), None).unwrap_err();
        assert!(matches!(err, AnalysisError::DataValidation(_)));
    }

    #[test]
    fn test_duplicates_dropped_and_limit_applied() {
        let file = write_csv(
            "reviewer,title,body,timestamp\n\
             alice,Great,Works perfectly,2024-05-01\n\
             alice,Great,Works perfectly,2024-05-01\n\
             bob,Meh,Too loud,2024-05-02\n\
             carol,Fine,Does the job,2024-05-03\n",
        );
        let reviews = load_reviews(file.path(), Some(2)).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].reviewer, "bob");
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2024-05-01").is_some());
        assert!(parse_timestamp("2024-05-01 10:30:00").is_some());
        assert!(parse_timestamp("2024-05-01T10:30:00Z").is_some());
        assert!(parse_timestamp("05/20/2024").is_some());
        assert!(parse_timestamp("last tuesday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
