pub mod analysis;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod text;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::ProcessOutcome;
use crate::report::{ReportPaths, ReportWriter};
use log::{debug, info};
use std::path::Path;

/// Load, preprocess and analyze a review file, returning the raw outcome.
pub fn process_review_file(
    input_path: &Path,
    config: &Config,
    num_threads: usize,
) -> Result<ProcessOutcome> {
    info!(
        "Processing review file {:?} with {} threads",
        input_path, num_threads
    );

    let reviews = data::load_reviews(input_path, config.analysis.sample_limit)?;
    let reviews = data::preprocess_reviews(reviews);

    let stats = data::summary_stats(&reviews);
    info!(
        "Corpus: {} reviews ({} with timestamps), mean length {:.0} chars, \
         sentiment {}+/{}-/{}=",
        stats.total_reviews,
        stats.with_timestamp,
        stats.mean_char_length,
        stats.positive,
        stats.negative,
        stats.neutral
    );

    let cache = CacheStore::new(&config.cache)?;
    pipeline::process_reviews(&reviews, config, &cache, num_threads)
}

/// Full run: analysis plus report artifacts on disk.
pub fn analyze_review_file(
    input_path: &Path,
    output_name: Option<&str>,
    config: &Config,
    num_threads: usize,
) -> Result<ReportPaths> {
    info!("Starting review analysis");
    debug!("Input: {:?}, output name: {:?}", input_path, output_name);

    let outcome = process_review_file(input_path, config, num_threads)?;

    let writer = ReportWriter::new(&config.report.output_dir)?;
    let paths = writer.write(&outcome, output_name)?;

    info!(
        "Analysis complete: {} dimensions, {} insights, {} associations",
        outcome.results.len(),
        outcome.insights.len(),
        outcome.correlations.len()
    );

    Ok(paths)
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
