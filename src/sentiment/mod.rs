mod lexicon;
mod scorer;

pub use lexicon::ReviewLexicon;
pub use scorer::{SentimentLabel, SentimentScore, SentimentScorer};
