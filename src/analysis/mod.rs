mod category;
mod record;

pub use category::{CategoryKey, Dimension, Taxonomy, TaxonomyLeaf};
pub use record::{
    AnalysisResult, CategoryRecord, CorrelationRecord, CorrelationType, Insight, InsightKind,
    RunMetadata, SentimentSummary, TrendDirection, TrendSummary,
};
