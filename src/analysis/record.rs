use crate::analysis::category::{CategoryKey, Dimension};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category aggregation output. The sentiment and trend stages fill
/// their fields as the pipeline advances; everything else is written once
/// by the mention stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub mention_count: usize,
    /// Exactly 100 * mention_count / total_reviews.
    pub percentage: f64,
    /// First matches in review iteration order, capped (default 3).
    pub examples: Vec<String>,
    /// Keywords that produced the matches.
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub insights: Vec<String>,
}

/// Sentiment aggregate over a category's retained examples only — not the
/// full mention set. Inherited scope limitation, kept as documented
/// behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub mean: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Strict comparison on both sides: a change rate of exactly the
    /// threshold classifies as stable.
    pub fn classify(change_rate: f64, threshold: f64) -> Self {
        if change_rate > threshold {
            TrendDirection::Increasing
        } else if change_rate < -threshold {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Day-bucketed mention trend, computed over example-matched reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub time_series: BTreeMap<NaiveDate, usize>,
    pub change_rate: f64,
    pub direction: TrendDirection,
}

impl TrendSummary {
    /// Endpoint-delta change rate: `(last - first) / first`, 0 when the
    /// first bucket is empty or only one bucket exists.
    pub fn from_series(time_series: BTreeMap<NaiveDate, usize>, threshold: f64) -> Self {
        let change_rate = if time_series.len() > 1 {
            let first = *time_series.values().next().unwrap_or(&0);
            let last = *time_series.values().next_back().unwrap_or(&0);
            if first != 0 {
                (last as f64 - first as f64) / first as f64
            } else {
                0.0
            }
        } else {
            0.0
        };

        Self {
            time_series,
            change_rate,
            direction: TrendDirection::classify(change_rate, threshold),
        }
    }
}

/// Run bookkeeping attached to every analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_samples: usize,
    pub processed_samples: usize,
    pub error_samples: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl RunMetadata {
    pub fn start(total_samples: usize) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            start_time: Utc::now(),
            end_time: None,
            total_samples,
            processed_samples: 0,
            error_samples: 0,
            errors: Vec::new(),
        }
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error_samples += 1;
        self.errors.push(message.into());
    }

    pub fn finish(&mut self, processed: usize) {
        self.processed_samples = processed;
        self.end_time = Some(Utc::now());
    }
}

/// One dimension's complete aggregation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub dimension: Dimension,
    pub total_reviews: usize,
    pub categories: BTreeMap<CategoryKey, CategoryRecord>,
    pub metadata: RunMetadata,
}

impl AnalysisResult {
    pub fn empty(dimension: Dimension, total_reviews: usize) -> Self {
        Self {
            dimension,
            total_reviews,
            categories: BTreeMap::new(),
            metadata: RunMetadata::start(total_reviews),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationType {
    Positive,
    Weak,
}

impl CorrelationType {
    /// Strictly above the threshold classifies as positive; exactly the
    /// threshold stays weak.
    pub fn classify(strength: f64, positive_threshold: f64) -> Self {
        if strength > positive_threshold {
            CorrelationType::Positive
        } else {
            CorrelationType::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationType::Positive => "positive",
            CorrelationType::Weak => "weak",
        }
    }
}

/// Example-overlap association between two categories of different
/// dimensions. With example sets capped at 3 this is a cheap heuristic,
/// not a statistical correlation; recomputed on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationRecord {
    pub dimension1: Dimension,
    pub dimension2: Dimension,
    pub category1: CategoryKey,
    pub category2: CategoryKey,
    pub cooccurrence: usize,
    pub strength: f64,
    pub correlation_type: CorrelationType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    Frequency,
    Sentiment,
    Trend,
    Correlation,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Frequency => "frequency",
            InsightKind::Sentiment => "sentiment",
            InsightKind::Trend => "trend",
            InsightKind::Correlation => "correlation",
        }
    }
}

/// A generated natural-language finding with a priority in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub dimension: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryKey>,
    pub kind: InsightKind,
    pub text: String,
    pub priority: f64,
}
