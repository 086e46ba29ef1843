//! Insight synthesis over finished dimension results.

use crate::analysis::{
    AnalysisResult, CategoryRecord, CorrelationRecord, CorrelationType, Dimension, Insight,
    InsightKind,
};
use log::info;

/// Fixed per-dimension weight applied to every priority score.
fn dimension_weight(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::User => 1.0,
        Dimension::Experience => 0.8,
        Dimension::Motivation => 0.8,
        Dimension::Design => 0.9,
        Dimension::Purpose => 0.7,
        Dimension::Scenario => 0.7,
        Dimension::Timing => 0.7,
        Dimension::Location => 0.6,
    }
}

#[derive(Debug, Default)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic given identical input: insights are produced in
    /// result/category order and sorted by priority with a full tie-break.
    pub fn generate(
        &self,
        results: &[AnalysisResult],
        correlations: &[CorrelationRecord],
    ) -> Vec<Insight> {
        let mut insights = Vec::new();

        for result in results {
            for (key, record) in &result.categories {
                let priority = priority_score(result.dimension, record);
                let label = format!("{} {}", result.dimension.as_str(), key.display_name());

                insights.push(Insight {
                    dimension: result.dimension,
                    category: Some(key.clone()),
                    kind: InsightKind::Frequency,
                    text: frequency_text(&label, record.percentage),
                    priority,
                });

                if let Some(sentiment) = &record.sentiment {
                    let total = sentiment.positive + sentiment.negative + sentiment.neutral;
                    if total > 0 {
                        insights.push(Insight {
                            dimension: result.dimension,
                            category: Some(key.clone()),
                            kind: InsightKind::Sentiment,
                            text: sentiment_text(
                                &label,
                                sentiment.mean,
                                sentiment.positive,
                                sentiment.negative,
                                total,
                            ),
                            priority,
                        });
                    }
                }

                if let Some(trend) = &record.trend {
                    insights.push(Insight {
                        dimension: result.dimension,
                        category: Some(key.clone()),
                        kind: InsightKind::Trend,
                        text: trend_text(&label, trend.change_rate),
                        priority,
                    });
                }
            }
        }

        for correlation in correlations {
            insights.push(correlation_insight(correlation));
        }

        insights.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.dimension.cmp(&b.dimension))
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.text.cmp(&b.text))
        });

        info!("Generated {} insights", insights.len());
        insights
    }
}

/// `weight * mean(normalized percentage, |sentiment|, normalized trend)`,
/// clamped to [0, 1].
fn priority_score(dimension: Dimension, record: &CategoryRecord) -> f64 {
    let percentage_factor = record.percentage / 100.0;
    let sentiment_factor = record.sentiment.as_ref().map(|s| s.mean.abs()).unwrap_or(0.0);
    let trend_factor = record
        .trend
        .as_ref()
        .map(|t| t.change_rate.abs().min(1.0))
        .unwrap_or(0.0);

    let mean = (percentage_factor + sentiment_factor + trend_factor) / 3.0;
    (dimension_weight(dimension) * mean).clamp(0.0, 1.0)
}

fn frequency_text(label: &str, percentage: f64) -> String {
    if percentage > 50.0 {
        format!("{label} is highly prevalent, appearing in {percentage:.1}% of reviews")
    } else if percentage > 25.0 {
        format!("{label} shows moderate presence, mentioned in {percentage:.1}% of reviews")
    } else {
        format!("{label} has limited presence, only in {percentage:.1}% of reviews")
    }
}

fn sentiment_text(label: &str, mean: f64, positive: usize, negative: usize, total: usize) -> String {
    let pos_ratio = positive as f64 / total as f64 * 100.0;
    let neg_ratio = negative as f64 / total as f64 * 100.0;

    if mean > 0.5 {
        format!("{label} receives highly positive feedback ({pos_ratio:.1}% positive)")
    } else if mean > 0.0 {
        format!("{label} receives moderately positive feedback ({pos_ratio:.1}% positive)")
    } else if mean < -0.5 {
        format!("{label} receives significant negative feedback ({neg_ratio:.1}% negative)")
    } else if mean < 0.0 {
        format!("{label} receives some negative feedback ({neg_ratio:.1}% negative)")
    } else {
        format!("{label} receives mixed feedback")
    }
}

fn trend_text(label: &str, change_rate: f64) -> String {
    if change_rate.abs() < 0.1 {
        format!("{label} shows stable patterns over time")
    } else if change_rate > 0.0 {
        format!(
            "{label} shows an increasing trend, growing by {:.1}% between endpoints",
            change_rate * 100.0
        )
    } else {
        format!(
            "{label} shows a decreasing trend, declining by {:.1}% between endpoints",
            change_rate.abs() * 100.0
        )
    }
}

fn correlation_insight(correlation: &CorrelationRecord) -> Insight {
    let text = match correlation.correlation_type {
        CorrelationType::Positive => format!(
            "Strong association between {} ({}) and {} ({})",
            correlation.category1.display_name(),
            correlation.dimension1,
            correlation.category2.display_name(),
            correlation.dimension2,
        ),
        CorrelationType::Weak => format!(
            "Weak association between {} ({}) and {} ({})",
            correlation.category1.display_name(),
            correlation.dimension1,
            correlation.category2.display_name(),
            correlation.dimension2,
        ),
    };

    Insight {
        dimension: correlation.dimension1,
        category: Some(correlation.category1.clone()),
        kind: InsightKind::Correlation,
        text,
        priority: (correlation.strength * 0.8).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CategoryKey, SentimentSummary};

    fn record(percentage: f64, sentiment_mean: Option<f64>) -> CategoryRecord {
        CategoryRecord {
            mention_count: 1,
            percentage,
            examples: vec!["example".to_string()],
            keywords: Vec::new(),
            sentiment: sentiment_mean.map(|mean| SentimentSummary {
                mean,
                positive: if mean > 0.0 { 1 } else { 0 },
                negative: if mean < 0.0 { 1 } else { 0 },
                neutral: 0,
            }),
            trend: None,
            insights: Vec::new(),
        }
    }

    fn result_with(percentage: f64, sentiment_mean: Option<f64>) -> AnalysisResult {
        let mut result = AnalysisResult::empty(Dimension::Experience, 10);
        result.categories.insert(
            CategoryKey::new("usability", "ease_of_use"),
            record(percentage, sentiment_mean),
        );
        result
    }

    #[test]
    fn test_priority_clamped_to_unit_interval() {
        let results = vec![result_with(100.0, Some(1.0))];
        let insights = InsightGenerator::new().generate(&results, &[]);
        assert!(!insights.is_empty());
        for insight in &insights {
            assert!((0.0..=1.0).contains(&insight.priority));
        }
    }

    #[test]
    fn test_sorted_by_priority_descending() {
        let results = vec![result_with(80.0, Some(0.9)), {
            let mut low = AnalysisResult::empty(Dimension::Location, 10);
            low.categories
                .insert(CategoryKey::new("indoor", "living_areas"), record(5.0, None));
            low
        }];

        let insights = InsightGenerator::new().generate(&results, &[]);
        for pair in insights.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn test_deterministic_output() {
        let results = vec![result_with(40.0, Some(0.2))];
        let first = InsightGenerator::new().generate(&results, &[]);
        let second = InsightGenerator::new().generate(&results, &[]);
        let texts1: Vec<&str> = first.iter().map(|i| i.text.as_str()).collect();
        let texts2: Vec<&str> = second.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts1, texts2);
    }

    #[test]
    fn test_sentiment_wording_thresholds() {
        assert!(sentiment_text("x", 0.6, 3, 0, 3).contains("highly positive"));
        assert!(sentiment_text("x", 0.2, 2, 1, 3).contains("moderately positive"));
        assert!(sentiment_text("x", -0.6, 0, 3, 3).contains("significant negative"));
        assert!(sentiment_text("x", -0.2, 1, 2, 3).contains("some negative"));
        assert!(sentiment_text("x", 0.0, 0, 0, 3).contains("mixed"));
    }

    #[test]
    fn test_frequency_wording_thresholds() {
        assert!(frequency_text("x", 60.0).contains("highly prevalent"));
        assert!(frequency_text("x", 30.0).contains("moderate presence"));
        assert!(frequency_text("x", 10.0).contains("limited presence"));
    }
}
