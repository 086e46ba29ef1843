//! Sectioned plain-text report.

use crate::analysis::AnalysisResult;
use crate::pipeline::ProcessOutcome;
use chrono::Utc;
use std::fmt::Write;

const MAX_EXAMPLES_SHOWN: usize = 2;
const MAX_INSIGHTS_SHOWN: usize = 20;

pub fn render(outcome: &ProcessOutcome) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Product Review Analysis Report ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "1. Basic Information");
    let total_reviews = outcome
        .results
        .first()
        .map(|r| r.total_reviews)
        .unwrap_or(0);
    let _ = writeln!(out, "Total reviews analyzed: {total_reviews}");
    let _ = writeln!(out, "Generated at: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Dimensions analyzed: {}", outcome.results.len());
    if !outcome.failures.is_empty() {
        let _ = writeln!(out, "Dimensions with errors:");
        for (dimension, error) in &outcome.failures {
            let _ = writeln!(out, "  - {}: {}", dimension.title(), error);
        }
    }

    for (idx, result) in outcome.results.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", idx + 2, result.dimension.title());
        render_dimension(&mut out, result);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}. Prioritized Insights", outcome.results.len() + 2);
    if outcome.insights.is_empty() {
        let _ = writeln!(out, "No insights generated.");
    }
    for insight in outcome.insights.iter().take(MAX_INSIGHTS_SHOWN) {
        let _ = writeln!(
            out,
            "[{:.2}] ({}) {}",
            insight.priority,
            insight.kind.as_str(),
            insight.text
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}. Cross-Dimension Associations", outcome.results.len() + 3);
    if outcome.correlations.is_empty() {
        let _ = writeln!(out, "No associations above the strength floor.");
    }
    for correlation in &outcome.correlations {
        let _ = writeln!(
            out,
            "{} <-> {}: strength {:.3} ({}), {} shared examples",
            correlation.category1.display_name(),
            correlation.category2.display_name(),
            correlation.strength,
            correlation.correlation_type.as_str(),
            correlation.cooccurrence
        );
    }

    out
}

fn render_dimension(out: &mut String, result: &AnalysisResult) {
    if result.categories.is_empty() {
        let _ = writeln!(out, "No categories met the reporting thresholds.");
        return;
    }

    for (key, record) in &result.categories {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", key.display_name().to_uppercase());
        let _ = writeln!(out, "Mentions: {}", record.mention_count);
        let _ = writeln!(out, "Share: {:.1}%", record.percentage);

        if let Some(sentiment) = &record.sentiment {
            let _ = writeln!(
                out,
                "Sentiment: mean {:.2} ({} positive / {} negative / {} neutral)",
                sentiment.mean, sentiment.positive, sentiment.negative, sentiment.neutral
            );
        }

        if let Some(trend) = &record.trend {
            let _ = writeln!(
                out,
                "Trend: {} (change rate {:.2})",
                trend.direction.as_str(),
                trend.change_rate
            );
        }

        if !record.examples.is_empty() {
            let _ = writeln!(out, "Representative reviews:");
            for example in record.examples.iter().take(MAX_EXAMPLES_SHOWN) {
                let _ = writeln!(out, "  - {example}");
            }
        }

        for insight in &record.insights {
            let _ = writeln!(out, "Note: {insight}");
        }
    }
}
