//! The analysis driver: fans the eight dimensions out over a rayon pool
//! and never lets one dimension's failure abort the run.

use crate::analysis::{AnalysisResult, CorrelationRecord, Dimension, Insight};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::data::Review;
use crate::error::{AnalysisError, Result};
use crate::pipeline::correlate::Correlator;
use crate::pipeline::engine::DimensionAnalyzer;
use crate::pipeline::insight::InsightGenerator;
use log::{error, info};
use rayon::prelude::*;

/// Everything a full run produces, before report rendering.
#[derive(Debug)]
pub struct ProcessOutcome {
    /// One result per dimension, in `Dimension::all()` order. A failed
    /// dimension contributes an empty result.
    pub results: Vec<AnalysisResult>,
    pub correlations: Vec<CorrelationRecord>,
    pub insights: Vec<Insight>,
    pub failures: Vec<(Dimension, String)>,
}

/// Run every dimension analyzer over the corpus.
pub fn process_reviews(
    reviews: &[Review],
    config: &Config,
    cache: &CacheStore,
    num_threads: usize,
) -> Result<ProcessOutcome> {
    if reviews.is_empty() {
        return Err(AnalysisError::DataValidation(
            "no reviews to analyze".to_string(),
        ));
    }

    info!(
        "Starting analysis of {} reviews across {} dimensions with {} threads",
        reviews.len(),
        Dimension::all().len(),
        num_threads
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| AnalysisError::Resource(format!("cannot build thread pool: {e}")))?;

    let outcomes: Vec<(Dimension, std::result::Result<AnalysisResult, String>)> =
        pool.install(|| {
            Dimension::all()
                .par_iter()
                .map(|&dimension| {
                    let analyzer = DimensionAnalyzer::new(dimension, config.analysis.clone());
                    match analyzer.analyze(reviews, cache) {
                        Ok(result) => (dimension, Ok(result)),
                        Err(e) => {
                            error!("{dimension} analysis failed: {e}");
                            (dimension, Err(e.to_string()))
                        }
                    }
                })
                .collect()
        });

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (dimension, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(message) => {
                // The failed dimension still appears in the report, empty.
                results.push(AnalysisResult::empty(dimension, reviews.len()));
                failures.push((dimension, message));
            }
        }
    }

    info!("Computing cross-dimension correlations...");
    let correlator = Correlator::new(&config.analysis);
    let mut correlations = Vec::new();
    for i in 0..results.len() {
        for j in i + 1..results.len() {
            correlations.extend(correlator.correlate(&results[i], &results[j]));
        }
    }
    info!("{} cross-dimension associations retained", correlations.len());

    let insights = InsightGenerator::new().generate(&results, &correlations);

    info!(
        "Analysis complete: {}/{} dimensions succeeded, {} insights",
        results.len() - failures.len(),
        results.len(),
        insights.len()
    );

    Ok(ProcessOutcome {
        results,
        correlations,
        insights,
        failures,
    })
}
