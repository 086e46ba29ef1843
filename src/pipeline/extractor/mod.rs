mod design;
mod experience;
mod location;
mod motivation;
mod purpose;
mod scenario;
mod timing;
mod user;

use crate::analysis::{AnalysisResult, CategoryKey, Dimension, Taxonomy};
use crate::text::{ParsedSentence, lemma};
use std::collections::HashSet;

/// Dimension-specific category extraction strategy.
///
/// Implementations are stateless beyond their taxonomy: one parsed
/// sentence in, candidate (category, phrase) pairs out. The shared engine
/// owns iteration, de-noising and every aggregation stage.
pub trait CategoryExtractor: Send + Sync {
    fn dimension(&self) -> Dimension;

    fn taxonomy(&self) -> &Taxonomy;

    /// De-noising floor: categories with fewer distinct phrases than this
    /// are dropped.
    fn min_distinct_phrases(&self) -> usize {
        2
    }

    /// Candidate phrases and their categories from one sentence.
    fn extract(&self, sentence: &ParsedSentence) -> Vec<(CategoryKey, String)>;

    /// Dimension-specific insight augmentation over the finished result.
    fn augment(&self, _result: &mut AnalysisResult) {}
}

/// Factory mapping each dimension to its extraction strategy.
pub fn extractor_for(dimension: Dimension) -> Box<dyn CategoryExtractor> {
    match dimension {
        Dimension::User => Box::new(user::UserExtractor::new()),
        Dimension::Timing => Box::new(timing::TimingExtractor::new()),
        Dimension::Location => Box::new(location::LocationExtractor::new()),
        Dimension::Purpose => Box::new(purpose::PurposeExtractor::new()),
        Dimension::Scenario => Box::new(scenario::ScenarioExtractor::new()),
        Dimension::Motivation => Box::new(motivation::MotivationExtractor::new()),
        Dimension::Experience => Box::new(experience::ExperienceExtractor::new()),
        Dimension::Design => Box::new(design::DesignExtractor::new()),
    }
}

/// Positions of tokens whose lemma matches any single-word taxonomy
/// keyword. Multi-word keywords are matched later against assembled
/// phrases by `Taxonomy::classify`.
pub(crate) fn trigger_positions(sentence: &ParsedSentence, taxonomy: &Taxonomy) -> Vec<usize> {
    let keyword_lemmas: HashSet<String> = taxonomy
        .keyword_entries()
        .filter(|(_, kw)| !kw.contains(' '))
        .map(|(_, kw)| lemma(kw))
        .collect();

    (0..sentence.len())
        .filter(|&i| {
            sentence
                .lemma_at(i)
                .is_some_and(|l| keyword_lemmas.contains(l))
        })
        .collect()
}

/// Classify an assembled phrase, returning the owned key on a hit.
pub(crate) fn classify_phrase(taxonomy: &Taxonomy, phrase: &str) -> Option<(CategoryKey, String)> {
    taxonomy
        .classify(phrase)
        .map(|key| (key.clone(), phrase.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Tokenizer;

    #[test]
    fn test_factory_covers_every_dimension() {
        for dimension in Dimension::all() {
            let extractor = extractor_for(dimension);
            assert_eq!(extractor.dimension(), dimension);
            assert!(extractor.min_distinct_phrases() >= 2);
            assert!(!extractor.taxonomy().leaves().is_empty());
        }
    }

    #[test]
    fn test_trigger_positions_use_lemmas() {
        let taxonomy = Taxonomy::new(&[("performance", &[("speed", &["fast", "quick"][..])][..])]);
        let sentence = ParsedSentence::parse(&Tokenizer::new(), "a quick clean every day");
        assert_eq!(trigger_positions(&sentence, &taxonomy), vec![1]);

        let no_hit = ParsedSentence::parse(&Tokenizer::new(), "arrived in a big box");
        assert!(trigger_positions(&no_hit, &taxonomy).is_empty());
    }
}
