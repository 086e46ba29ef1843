mod loader;
mod preprocess;

pub use loader::load_reviews;
pub use preprocess::preprocess_reviews;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One input record. Immutable once loading and preprocessing finish;
/// every aggregation stage consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: String,
    pub title: String,
    pub body: String,
    pub timestamp: Option<DateTime<Utc>>,

    // Derived fields, filled by preprocessing.
    /// Cleaned, lowercased title + body; the text every stage matches on.
    pub text: String,
    pub char_length: usize,
    pub word_count: usize,
    pub sentiment_score: f64,
    pub keywords: Vec<String>,
}

impl Review {
    pub fn new(
        reviewer: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            reviewer: reviewer.into(),
            title: title.into(),
            body: body.into(),
            timestamp,
            text: String::new(),
            char_length: 0,
            word_count: 0,
            sentiment_score: 0.0,
            keywords: Vec::new(),
        }
    }
}

/// Corpus-level statistics logged after loading.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total_reviews: usize,
    pub with_timestamp: usize,
    pub mean_char_length: f64,
    pub mean_word_count: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

pub fn summary_stats(reviews: &[Review]) -> SummaryStats {
    let total = reviews.len();
    let divisor = total.max(1) as f64;
    SummaryStats {
        total_reviews: total,
        with_timestamp: reviews.iter().filter(|r| r.timestamp.is_some()).count(),
        mean_char_length: reviews.iter().map(|r| r.char_length).sum::<usize>() as f64 / divisor,
        mean_word_count: reviews.iter().map(|r| r.word_count).sum::<usize>() as f64 / divisor,
        positive: reviews.iter().filter(|r| r.sentiment_score > 0.0).count(),
        negative: reviews.iter().filter(|r| r.sentiment_score < 0.0).count(),
        neutral: reviews.iter().filter(|r| r.sentiment_score == 0.0).count(),
    }
}
