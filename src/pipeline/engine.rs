//! The shared aggregation engine every dimension runs through.
//!
//! One serial pass per stage: extract categories, count mentions, attach
//! sentiment, attach trends, augment with dimension-specific insights.
//! Stages hand explicit values to each other; the only shared state is
//! the cache.

use crate::analysis::{
    AnalysisResult, CategoryKey, CategoryRecord, Dimension, RunMetadata, SentimentSummary,
    TrendSummary,
};
use crate::cache::CacheStore;
use crate::config::AnalysisSettings;
use crate::data::Review;
use crate::error::{AnalysisError, Result};
use crate::pipeline::extractor::{CategoryExtractor, extractor_for};
use crate::sentiment::SentimentScorer;
use crate::text::TextProcessor;
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

pub struct DimensionAnalyzer {
    extractor: Box<dyn CategoryExtractor>,
    text: TextProcessor,
    scorer: SentimentScorer,
    settings: AnalysisSettings,
}

impl DimensionAnalyzer {
    pub fn new(dimension: Dimension, settings: AnalysisSettings) -> Self {
        Self {
            extractor: extractor_for(dimension),
            text: TextProcessor::new(),
            scorer: SentimentScorer::new(),
            settings,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.extractor.dimension()
    }

    /// Run the full pipeline for this dimension, serving from cache when a
    /// fresh entry exists. The per-fingerprint lock makes the
    /// read-check-compute-write sequence single-flight under concurrent
    /// dimension runs.
    pub fn analyze(&self, reviews: &[Review], cache: &CacheStore) -> Result<AnalysisResult> {
        let dimension = self.dimension();
        validate(reviews)?;

        cache.sweep_expired();
        let fingerprint = CacheStore::fingerprint(dimension.as_str(), reviews);
        let lock = cache.lock_for(&fingerprint);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(cached) = cache.load(dimension.as_str(), &fingerprint) {
            return Ok(cached);
        }

        let mut metadata = RunMetadata::start(reviews.len());

        info!("[{dimension}] Extracting categories...");
        let categories = self.extract_categories(reviews, &mut metadata);
        debug!("[{dimension}] {} categories retained", categories.len());

        info!("[{dimension}] Counting mentions...");
        let mentions = self.count_mentions(reviews, &categories)?;

        info!("[{dimension}] Analyzing sentiment...");
        let with_sentiment = self.attach_sentiment(mentions);

        info!("[{dimension}] Analyzing trends...");
        let with_trends = self.attach_trends(reviews, with_sentiment);

        let mut result = AnalysisResult {
            dimension,
            total_reviews: reviews.len(),
            categories: with_trends,
            metadata,
        };

        info!("[{dimension}] Generating insights...");
        self.extractor.augment(&mut result);

        result.metadata.finish(reviews.len());
        cache.store(dimension.as_str(), &fingerprint, &result);

        info!(
            "[{dimension}] Analysis complete: {} categories over {} reviews",
            result.categories.len(),
            result.total_reviews
        );
        Ok(result)
    }

    /// Stage 1: map each review's sentences through the extraction
    /// strategy and keep categories that clear the distinct-phrase floor.
    fn extract_categories(
        &self,
        reviews: &[Review],
        metadata: &mut RunMetadata,
    ) -> BTreeMap<CategoryKey, BTreeSet<String>> {
        let mut observed: BTreeMap<CategoryKey, BTreeSet<String>> = BTreeMap::new();

        for (idx, review) in reviews.iter().enumerate() {
            if review.text.is_empty() {
                metadata.record_error(format!("review {idx}: empty text"));
                continue;
            }

            for sentence in self.text.parse_sentences(&review.text) {
                for (key, phrase) in self.extractor.extract(&sentence) {
                    observed.entry(key).or_default().insert(phrase);
                }
            }
        }

        let floor = self.extractor.min_distinct_phrases();
        observed.retain(|_, phrases| phrases.len() >= floor);
        observed
    }

    /// Stage 2: re-derive matches from the taxonomy's full keyword set,
    /// independent of the extracted phrases.
    fn count_mentions(
        &self,
        reviews: &[Review],
        categories: &BTreeMap<CategoryKey, BTreeSet<String>>,
    ) -> Result<BTreeMap<CategoryKey, CategoryRecord>> {
        let total = reviews.len();
        let mut records = BTreeMap::new();

        for (key, phrases) in categories {
            let keywords = self
                .extractor
                .taxonomy()
                .keywords_for(key)
                .ok_or_else(|| {
                    AnalysisError::processing(
                        "mention counting",
                        format!("category {key} missing from taxonomy"),
                    )
                })?
                .to_vec();

            let mut count = 0usize;
            let mut examples = Vec::new();
            for (idx, review) in reviews.iter().enumerate() {
                if review.text.is_empty() {
                    warn!("Skipping review {idx} with no text");
                    continue;
                }
                if self.text.matches_any_keyword(&review.text, &keywords) {
                    count += 1;
                    if examples.len() < self.settings.max_examples {
                        examples.push(review.text.clone());
                    }
                }
            }

            if count > 0 {
                records.insert(
                    key.clone(),
                    CategoryRecord {
                        mention_count: count,
                        percentage: count as f64 / total as f64 * 100.0,
                        examples,
                        keywords: phrases.iter().cloned().collect(),
                        sentiment: None,
                        trend: None,
                        insights: Vec::new(),
                    },
                );
            }
        }

        Ok(records)
    }

    /// Stage 3: score each category's retained examples. Sentiment covers
    /// the capped example set only, not the full mention set.
    fn attach_sentiment(
        &self,
        mut records: BTreeMap<CategoryKey, CategoryRecord>,
    ) -> BTreeMap<CategoryKey, CategoryRecord> {
        for record in records.values_mut() {
            if record.examples.is_empty() {
                continue;
            }
            let scores = self.scorer.score_batch(&record.examples);
            let mean = scores.iter().map(|s| s.polarity).sum::<f64>() / scores.len() as f64;
            record.sentiment = Some(SentimentSummary {
                mean,
                positive: scores.iter().filter(|s| s.polarity > 0.0).count(),
                negative: scores.iter().filter(|s| s.polarity < 0.0).count(),
                neutral: scores.iter().filter(|s| s.polarity == 0.0).count(),
            });
        }
        records
    }

    /// Stage 4: day-bucketed trend over example-matched reviews. Without
    /// timestamps the input passes through unchanged.
    fn attach_trends(
        &self,
        reviews: &[Review],
        mut records: BTreeMap<CategoryKey, CategoryRecord>,
    ) -> BTreeMap<CategoryKey, CategoryRecord> {
        if reviews.iter().all(|r| r.timestamp.is_none()) {
            warn!(
                "[{}] No timestamps available, skipping trend analysis",
                self.dimension()
            );
            return records;
        }

        for record in records.values_mut() {
            let example_set: BTreeSet<&str> =
                record.examples.iter().map(String::as_str).collect();

            let mut series: BTreeMap<chrono::NaiveDate, usize> = BTreeMap::new();
            for review in reviews {
                if !example_set.contains(review.text.as_str()) {
                    continue;
                }
                if let Some(ts) = review.timestamp {
                    *series.entry(ts.date_naive()).or_insert(0) += 1;
                }
            }

            if !series.is_empty() {
                record.trend = Some(TrendSummary::from_series(
                    series,
                    self.settings.trend_threshold,
                ));
            }
        }

        records
    }
}

fn validate(reviews: &[Review]) -> Result<()> {
    if reviews.is_empty() {
        return Err(AnalysisError::DataValidation(
            "no reviews to analyze".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheSettings;
    use chrono::{TimeZone, Utc};

    fn cache(dir: &tempfile::TempDir) -> CacheStore {
        CacheStore::new(&CacheSettings {
            enabled: true,
            dir: dir.path().to_string_lossy().into_owned(),
            ttl_secs: 3600,
        })
        .unwrap()
    }

    fn disabled_cache() -> CacheStore {
        CacheStore::new(&CacheSettings {
            enabled: false,
            dir: "unused".to_string(),
            ttl_secs: 3600,
        })
        .unwrap()
    }

    fn review(text: &str, day: Option<u32>) -> Review {
        let mut review = Review::new(
            "tester",
            "",
            "",
            day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap()),
        );
        review.text = text.to_string();
        review
    }

    fn ease_of_use_corpus() -> Vec<Review> {
        vec![
            review("so easy to set up and easy to empty", Some(1)),
            review("very simple controls, simple to store", Some(1)),
            review("intuitive and easy to use", Some(2)),
            review("too difficult to clean the filter", Some(2)),
            review("difficult instructions, poor manual", Some(3)),
        ]
    }

    #[test]
    fn test_empty_input_fails_validation() {
        let analyzer = DimensionAnalyzer::new(Dimension::Experience, AnalysisSettings::default());
        let err = analyzer.analyze(&[], &disabled_cache()).unwrap_err();
        assert!(matches!(err, AnalysisError::DataValidation(_)));
    }

    #[test]
    fn test_ease_of_use_scenario_sixty_percent() {
        let analyzer = DimensionAnalyzer::new(Dimension::Experience, AnalysisSettings::default());
        let result = analyzer
            .analyze(&ease_of_use_corpus(), &disabled_cache())
            .unwrap();

        let key = CategoryKey::new("usability", "ease_of_use");
        let record = result.categories.get(&key).expect("ease_of_use retained");
        assert_eq!(record.mention_count, 3);
        assert_eq!(record.percentage, 60.0);
        assert!(record.examples.len() <= 3);
    }

    #[test]
    fn test_denoising_floor_holds() {
        let analyzer = DimensionAnalyzer::new(Dimension::Experience, AnalysisSettings::default());
        let result = analyzer
            .analyze(&ease_of_use_corpus(), &disabled_cache())
            .unwrap();

        let floor = 3; // experience extractor's distinct-phrase floor
        for (key, record) in &result.categories {
            assert!(
                record.keywords.len() >= floor,
                "{key} retained with too few distinct phrases"
            );
            assert!(record.mention_count >= 1);
        }
    }

    #[test]
    fn test_percentage_exactness() {
        let analyzer = DimensionAnalyzer::new(Dimension::Experience, AnalysisSettings::default());
        let result = analyzer
            .analyze(&ease_of_use_corpus(), &disabled_cache())
            .unwrap();

        for record in result.categories.values() {
            assert_eq!(
                record.percentage,
                record.mention_count as f64 / result.total_reviews as f64 * 100.0
            );
        }
    }

    #[test]
    fn test_missing_timestamps_short_circuit_trend() {
        let analyzer = DimensionAnalyzer::new(Dimension::Experience, AnalysisSettings::default());
        let reviews: Vec<Review> = ease_of_use_corpus()
            .into_iter()
            .map(|mut r| {
                r.timestamp = None;
                r
            })
            .collect();
        let result = analyzer.analyze(&reviews, &disabled_cache()).unwrap();

        assert!(!result.categories.is_empty());
        for record in result.categories.values() {
            assert!(record.trend.is_none());
            // Sentiment still attached: trend short-circuits after it.
            assert!(record.sentiment.is_some());
        }
    }

    #[test]
    fn test_trend_attached_with_timestamps() {
        let analyzer = DimensionAnalyzer::new(Dimension::Experience, AnalysisSettings::default());
        let result = analyzer
            .analyze(&ease_of_use_corpus(), &disabled_cache())
            .unwrap();

        let key = CategoryKey::new("usability", "ease_of_use");
        let trend = result.categories[&key].trend.as_ref().unwrap();
        assert!(!trend.time_series.is_empty());
    }

    #[test]
    fn test_cached_rerun_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        let analyzer = DimensionAnalyzer::new(Dimension::Experience, AnalysisSettings::default());
        let reviews = ease_of_use_corpus();

        let first = analyzer.analyze(&reviews, &cache).unwrap();
        let second = analyzer.analyze(&reviews, &cache).unwrap();

        // The second run is served from cache: same run id, same content.
        assert_eq!(first.metadata.run_id, second.metadata.run_id);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
