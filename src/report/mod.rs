mod spreadsheet;
mod text;

use crate::error::{AnalysisError, Result};
use crate::pipeline::ProcessOutcome;
use chrono::Utc;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of every artifact one run writes.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub spreadsheet: PathBuf,
    pub json: PathBuf,
}

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: &str) -> Result<Self> {
        let output_dir = PathBuf::from(output_dir);
        fs::create_dir_all(&output_dir).map_err(|e| {
            AnalysisError::Resource(format!(
                "cannot create output dir {:?}: {}",
                output_dir, e
            ))
        })?;
        Ok(Self { output_dir })
    }

    /// Write the text report, the spreadsheet workbook and the JSON
    /// export, named by timestamp unless overridden.
    pub fn write(&self, outcome: &ProcessOutcome, output_name: Option<&str>) -> Result<ReportPaths> {
        let base = match output_name {
            Some(name) => name.to_string(),
            None => format!("review_analysis_{}", Utc::now().format("%Y%m%d_%H%M%S")),
        };

        let paths = ReportPaths {
            text: self.output_dir.join(format!("{base}.txt")),
            spreadsheet: self.output_dir.join(format!("{base}.xlsx")),
            json: self.output_dir.join(format!("{base}.json")),
        };

        info!("Writing text report to {:?}", paths.text);
        fs::write(&paths.text, text::render(outcome))?;

        info!("Writing spreadsheet report to {:?}", paths.spreadsheet);
        spreadsheet::render(outcome, &paths.spreadsheet)?;

        info!("Writing JSON export to {:?}", paths.json);
        export_json(outcome, &paths.json)?;

        Ok(paths)
    }
}

#[derive(Serialize)]
struct JsonExport<'a> {
    results: &'a [crate::analysis::AnalysisResult],
    correlations: &'a [crate::analysis::CorrelationRecord],
    insights: &'a [crate::analysis::Insight],
    failures: Vec<FailureEntry<'a>>,
}

#[derive(Serialize)]
struct FailureEntry<'a> {
    dimension: crate::analysis::Dimension,
    error: &'a str,
}

fn export_json(outcome: &ProcessOutcome, path: &Path) -> Result<()> {
    let export = JsonExport {
        results: &outcome.results,
        correlations: &outcome.correlations,
        insights: &outcome.insights,
        failures: outcome
            .failures
            .iter()
            .map(|(dimension, error)| FailureEntry {
                dimension: *dimension,
                error,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&export)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, CategoryKey, CategoryRecord, Dimension};

    fn sample_outcome() -> ProcessOutcome {
        let mut result = AnalysisResult::empty(Dimension::Experience, 5);
        result.categories.insert(
            CategoryKey::new("usability", "ease_of_use"),
            CategoryRecord {
                mention_count: 3,
                percentage: 60.0,
                examples: vec!["so easy to use".to_string()],
                keywords: vec!["easy".to_string()],
                sentiment: None,
                trend: None,
                insights: vec!["users like it".to_string()],
            },
        );

        ProcessOutcome {
            results: vec![result],
            correlations: Vec::new(),
            insights: Vec::new(),
            failures: vec![(Dimension::Design, "boom".to_string())],
        }
    }

    #[test]
    fn test_write_produces_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(&dir.path().to_string_lossy()).unwrap();

        let paths = writer.write(&sample_outcome(), Some("test_report")).unwrap();
        assert!(paths.text.exists());
        assert!(paths.spreadsheet.exists());
        assert!(paths.json.exists());

        let text = fs::read_to_string(&paths.text).unwrap();
        assert!(text.contains("USABILITY / EASE OF USE"));

        let json = fs::read_to_string(&paths.json).unwrap();
        assert!(json.contains("usability_ease_of_use"));
        assert!(json.contains("boom"));
    }

    #[test]
    fn test_timestamp_name_when_not_overridden() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(&dir.path().to_string_lossy()).unwrap();

        let paths = writer.write(&sample_outcome(), None).unwrap();
        let name = paths.text.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("review_analysis_"));
    }
}
