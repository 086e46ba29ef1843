//! Multi-sheet spreadsheet report: one sheet per dimension plus Summary
//! and Recommendations.

use crate::analysis::AnalysisResult;
use crate::error::{AnalysisError, Result};
use crate::pipeline::ProcessOutcome;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

const MAX_RECOMMENDATIONS: usize = 25;

pub fn render(outcome: &ProcessOutcome, path: &Path) -> Result<()> {
    build_workbook(outcome)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|e| AnalysisError::processing("spreadsheet report", e))
}

fn build_workbook(outcome: &ProcessOutcome) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    summary_sheet(workbook.add_worksheet(), outcome, &header)?;

    for result in &outcome.results {
        dimension_sheet(workbook.add_worksheet(), result, &header)?;
    }

    recommendations_sheet(workbook.add_worksheet(), outcome, &header)?;

    Ok(workbook)
}

fn summary_sheet(
    sheet: &mut Worksheet,
    outcome: &ProcessOutcome,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Summary")?;
    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(4, 40)?;

    for (col, title) in ["Dimension", "Categories", "Total Reviews", "Status", "Top Category"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (idx, result) in outcome.results.iter().enumerate() {
        let row = idx as u32 + 1;
        let failed = outcome
            .failures
            .iter()
            .any(|(dimension, _)| *dimension == result.dimension);

        sheet.write_string(row, 0, result.dimension.title())?;
        sheet.write_number(row, 1, result.categories.len() as f64)?;
        sheet.write_number(row, 2, result.total_reviews as f64)?;
        sheet.write_string(row, 3, if failed { "failed" } else { "ok" })?;

        let top = result
            .categories
            .iter()
            .max_by(|a, b| {
                a.1.mention_count
                    .cmp(&b.1.mention_count)
                    .then_with(|| b.0.cmp(a.0))
            })
            .map(|(key, _)| key.display_name())
            .unwrap_or_default();
        sheet.write_string(row, 4, top)?;
    }

    Ok(())
}

fn dimension_sheet(
    sheet: &mut Worksheet,
    result: &AnalysisResult,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    // Sheet names are capped at 31 characters by the format.
    let mut name = result.dimension.title().to_string();
    name.truncate(31);
    sheet.set_name(name)?;
    sheet.set_column_width(0, 28)?;
    sheet.set_column_width(9, 60)?;

    let titles = [
        "Category",
        "Mentions",
        "Percentage",
        "Sentiment Mean",
        "Positive",
        "Negative",
        "Neutral",
        "Trend",
        "Change Rate",
        "Example",
    ];
    for (col, title) in titles.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (idx, (key, record)) in result.categories.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, key.to_string())?;
        sheet.write_number(row, 1, record.mention_count as f64)?;
        sheet.write_number(row, 2, record.percentage)?;

        if let Some(sentiment) = &record.sentiment {
            sheet.write_number(row, 3, sentiment.mean)?;
            sheet.write_number(row, 4, sentiment.positive as f64)?;
            sheet.write_number(row, 5, sentiment.negative as f64)?;
            sheet.write_number(row, 6, sentiment.neutral as f64)?;
        }

        if let Some(trend) = &record.trend {
            sheet.write_string(row, 7, trend.direction.as_str())?;
            sheet.write_number(row, 8, trend.change_rate)?;
        }

        if let Some(example) = record.examples.first() {
            sheet.write_string(row, 9, example)?;
        }
    }

    Ok(())
}

fn recommendations_sheet(
    sheet: &mut Worksheet,
    outcome: &ProcessOutcome,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Recommendations")?;
    sheet.set_column_width(3, 80)?;

    for (col, title) in ["Priority", "Dimension", "Type", "Insight"].iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (idx, insight) in outcome
        .insights
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .enumerate()
    {
        let row = idx as u32 + 1;
        sheet.write_number(row, 0, insight.priority)?;
        sheet.write_string(row, 1, insight.dimension.title())?;
        sheet.write_string(row, 2, insight.kind.as_str())?;
        sheet.write_string(row, 3, &insight.text)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, CategoryKey, CategoryRecord, Dimension};

    #[test]
    fn test_workbook_written_to_disk() {
        let mut result = AnalysisResult::empty(Dimension::Location, 4);
        result.categories.insert(
            CategoryKey::new("indoor", "living_areas"),
            CategoryRecord {
                mention_count: 2,
                percentage: 50.0,
                examples: vec!["works great in the kitchen".to_string()],
                keywords: vec!["kitchen".to_string()],
                sentiment: None,
                trend: None,
                insights: Vec::new(),
            },
        );

        let outcome = ProcessOutcome {
            results: vec![result],
            correlations: Vec::new(),
            insights: Vec::new(),
            failures: Vec::new(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        render(&outcome, &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
