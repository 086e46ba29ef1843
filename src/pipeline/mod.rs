pub mod correlate;
pub mod engine;
pub mod extractor;
pub mod insight;
pub mod processor;

pub use correlate::Correlator;
pub use engine::DimensionAnalyzer;
pub use extractor::{CategoryExtractor, extractor_for};
pub use insight::InsightGenerator;
pub use processor::{ProcessOutcome, process_reviews};
